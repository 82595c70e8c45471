use crate::catalog::Catalog;
use crate::model::account::AccountType;
use crate::model::quote::{LineItem, round_cents};
use crate::pipeline::QuoteError;

/// Float residue below this is not a partial kit.
const KIT_QTY_TOLERANCE: f64 = 1e-6;

/// Partial kits are bought whole.
pub fn billed_kit_quantity(raw_qty: f64) -> u32 {
    if raw_qty.is_nan() || raw_qty <= 0.0 {
        return 0;
    }
    let whole = raw_qty.floor();
    let qty = if raw_qty - whole < KIT_QTY_TOLERANCE {
        whole
    } else {
        whole + 1.0
    };
    qty.min(f64::from(u32::MAX)) as u32
}

/// Unit price for `count` units of `product`, with the volume discount
/// applied when `count` reaches the threshold. Not rounded; only line
/// costs are.
pub fn unit_price(
    catalog: &Catalog,
    product: &str,
    count: u32,
    account: AccountType,
) -> Result<f64, QuoteError> {
    let rule = catalog.rule(product)?;
    let mut price = rule.unit_price(account).ok_or_else(|| {
        QuoteError::Config(format!(
            "pricing rule for '{}' has no '{}' column value",
            rule.product_name,
            account.price_column()
        ))
    })?;
    if let Some(discount) = &rule.discount {
        if count >= discount.threshold {
            price *= 1.0 - discount.percent / 100.0;
            tracing::debug!(
                product,
                count,
                threshold = discount.threshold,
                percent = discount.percent,
                "volume discount applied"
            );
        }
    }
    Ok(price)
}

/// `(total_cost, unit_price)` for `count` units.
pub fn price(
    catalog: &Catalog,
    product: &str,
    count: u32,
    account: AccountType,
) -> Result<(f64, f64), QuoteError> {
    let unit = unit_price(catalog, product, count, account)?;
    Ok((round_cents(unit * f64::from(count)), unit))
}

pub fn price_line(
    catalog: &Catalog,
    product: &str,
    count: u32,
    account: AccountType,
) -> Result<LineItem, QuoteError> {
    let (cost, unit_price) = price(catalog, product, count, account)?;
    Ok(LineItem {
        name: product.to_string(),
        count,
        unit_price,
        cost,
    })
}

/// Prices a real-valued kit demand after rounding it up to whole kits.
pub fn price_kit(
    catalog: &Catalog,
    kit: &str,
    raw_qty: f64,
    account: AccountType,
) -> Result<LineItem, QuoteError> {
    price_line(catalog, kit, billed_kit_quantity(raw_qty), account)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_price.rs"]
mod tests;
