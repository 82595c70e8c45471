use crate::catalog::Catalog;
use crate::pipeline::stage1_order::PanelKit;

/// One product line after bundle substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct BilledLine {
    pub product_name: String,
    pub count: u32,
    /// Raw units represented by one billed unit: the bundle size for a
    /// bundle product, 1 otherwise.
    pub units_per_item: u32,
}

/// Splits `count` raw units of `product` into bundle units plus the
/// unbundled remainder. Bundle product first; zero-count lines are
/// never emitted.
pub fn resolve_bundle(catalog: &Catalog, product: &str, count: u32) -> Vec<BilledLine> {
    if count == 0 {
        return Vec::new();
    }

    let bundle = catalog.rule(product).ok().and_then(|r| r.bundle.as_ref());
    let Some(bundle) = bundle else {
        return vec![BilledLine {
            product_name: product.to_string(),
            count,
            units_per_item: 1,
        }];
    };

    let bundle_count = count / bundle.bundle_size;
    let remainder = count % bundle.bundle_size;
    tracing::debug!(
        product,
        count,
        bundle_product = %bundle.bundle_product_name,
        bundle_count,
        remainder,
        "applied bundle rule"
    );

    let mut lines = Vec::with_capacity(2);
    if bundle_count > 0 {
        lines.push(BilledLine {
            product_name: bundle.bundle_product_name.clone(),
            count: bundle_count,
            units_per_item: bundle.bundle_size,
        });
    }
    if remainder > 0 {
        lines.push(BilledLine {
            product_name: product.to_string(),
            count: remainder,
            units_per_item: 1,
        });
    }
    lines
}

/// Kit demand moved by a billed line whose product has its own
/// sequencing rule: the panel-kit demand its raw units would draw is
/// released and the product's own kit is claimed instead.
#[derive(Debug, Clone, PartialEq)]
pub struct KitOverride {
    pub released: Vec<(String, f64)>,
    pub claimed: (String, f64),
}

/// `product_count` is the raw count the line was split from; each panel
/// kit's share of the line is proportional to that panel's batches.
pub fn kit_override(
    catalog: &Catalog,
    line: &BilledLine,
    panel_kits: &[PanelKit],
    product_count: u32,
) -> Option<KitOverride> {
    let spec = catalog
        .rule(&line.product_name)
        .ok()?
        .sequencing_override
        .as_ref()?;
    if product_count == 0 {
        return None;
    }

    let raw_units = f64::from(line.count) * f64::from(line.units_per_item);
    let released = panel_kits
        .iter()
        .map(|k| {
            let share = raw_units * f64::from(k.batches) / f64::from(product_count);
            (k.spec.kit_name.clone(), share * k.spec.qty_per_unit)
        })
        .collect();
    Some(KitOverride {
        released,
        claimed: (spec.kit_name.clone(), f64::from(line.count) * spec.qty_per_unit),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_bundle.rs"]
mod tests;
