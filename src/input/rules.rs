use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::{BundleRule, PricingRule, VolumeDiscount};
use crate::input::InputError;
use crate::input::panels::parse_sequencing;
use crate::input::table::{Row, Table, is_blank, parse_opt_f64, parse_opt_int, positive_u32, read_table};
use crate::model::account::AccountType;

pub const COL_PRODUCT_NAME: &str = "Product Name";
pub const COL_BUNDLE_SIZE: &str = "Bundle Size";
pub const COL_BUNDLE_PRODUCT: &str = "Bundle Product Name";
pub const COL_DISCOUNT_THRESHOLD: &str = "Sample Number for Discount";
pub const COL_DISCOUNT_PERCENT: &str = "Discount Percentage";
pub const COL_SEQ_KIT: &str = "Sequencing Kit";
pub const COL_SEQ_QTY: &str = "Sequencing Qty per Batch";

struct RuleColumns {
    product: usize,
    prices: Vec<(AccountType, Option<usize>)>,
    bundle_size: Option<usize>,
    bundle_product: Option<usize>,
    discount_threshold: Option<usize>,
    discount_percent: Option<usize>,
    seq_kit: Option<usize>,
    seq_qty: Option<usize>,
}

pub fn load_rules_table(path: &Path) -> Result<Vec<PricingRule>, InputError> {
    let table = read_table(path)?;
    parse_rules_table(&table)
}

/// Numeric garbage in a price, discount or bundle cell fails the load.
/// An empty price cell only means "no price for that account type".
pub fn parse_rules_table(table: &Table) -> Result<Vec<PricingRule>, InputError> {
    let cols = RuleColumns {
        product: table.require(COL_PRODUCT_NAME)?,
        prices: AccountType::ALL
            .into_iter()
            .map(|a| (a, table.column(&a.price_column())))
            .collect(),
        bundle_size: table.column(COL_BUNDLE_SIZE),
        bundle_product: table.column(COL_BUNDLE_PRODUCT),
        discount_threshold: table.column(COL_DISCOUNT_THRESHOLD),
        discount_percent: table.column(COL_DISCOUNT_PERCENT),
        seq_kit: table.column(COL_SEQ_KIT),
        seq_qty: table.column(COL_SEQ_QTY),
    };

    let mut rules = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let product = row.get(Some(cols.product));
        if product.is_empty() {
            tracing::warn!(line = row.line, "pricing rule has no product name; skipping");
            continue;
        }
        rules.push(parse_rule(table, row, &cols, product)?);
    }
    Ok(rules)
}

fn parse_rule(
    table: &Table,
    row: &Row,
    cols: &RuleColumns,
    product: &str,
) -> Result<PricingRule, InputError> {
    let mut prices = BTreeMap::new();
    for (account, col) in &cols.prices {
        let price = parse_opt_f64(row.get(*col))
            .map_err(|msg| table.malformed(row, format!("{}: {msg}", account.price_column())))?;
        if let Some(price) = price {
            if price < 0.0 {
                return Err(table.malformed(row, format!("negative {}", account.price_column())));
            }
            prices.insert(*account, price);
        }
    }

    Ok(PricingRule {
        product_name: product.to_string(),
        prices,
        discount: parse_discount(table, row, cols)?,
        bundle: parse_bundle(table, row, cols, product)?,
        sequencing_override: parse_sequencing(row, cols.seq_kit, cols.seq_qty, product),
    })
}

fn parse_discount(
    table: &Table,
    row: &Row,
    cols: &RuleColumns,
) -> Result<Option<VolumeDiscount>, InputError> {
    let threshold = parse_opt_int(row.get(cols.discount_threshold))
        .map_err(|msg| table.malformed(row, format!("{COL_DISCOUNT_THRESHOLD}: {msg}")))?;
    let percent = parse_opt_f64(row.get(cols.discount_percent))
        .map_err(|msg| table.malformed(row, format!("{COL_DISCOUNT_PERCENT}: {msg}")))?;

    match (threshold, percent) {
        (Some(threshold), Some(percent)) => {
            if !(0.0..=100.0).contains(&percent) {
                return Err(table.malformed(row, format!("discount percentage {percent} outside 0-100")));
            }
            let threshold = u32::try_from(threshold)
                .map_err(|_| table.malformed(row, format!("discount threshold {threshold} out of range")))?;
            Ok(Some(VolumeDiscount { threshold, percent }))
        }
        _ => Ok(None),
    }
}

fn parse_bundle(
    table: &Table,
    row: &Row,
    cols: &RuleColumns,
    product: &str,
) -> Result<Option<BundleRule>, InputError> {
    let size = parse_opt_int(row.get(cols.bundle_size))
        .map_err(|msg| table.malformed(row, format!("{COL_BUNDLE_SIZE}: {msg}")))?;
    let bundle_product = row.get(cols.bundle_product);

    match (size, is_blank(bundle_product)) {
        (Some(size), false) => match positive_u32(size) {
            Some(bundle_size) => Ok(Some(BundleRule {
                bundle_size,
                bundle_product_name: bundle_product.to_string(),
            })),
            None => {
                tracing::warn!(line = row.line, product, size, "non-positive bundle size; ignoring bundle rule");
                Ok(None)
            }
        },
        (Some(_), true) | (None, false) => {
            tracing::warn!(line = row.line, product, "incomplete bundle rule; ignoring");
            Ok(None)
        }
        (None, true) => Ok(None),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/rules.rs"]
mod tests;
