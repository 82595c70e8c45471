use crate::catalog::{Catalog, LookupError};
use crate::model::quote::{LineItem, Quote, cost_per_sample, round_cents};
use crate::model::request::SelectionRequest;
use crate::model::tally::Tally;
use crate::pipeline::QuoteError;
use crate::pipeline::stage1_order::resolve_order;
use crate::pipeline::stage2_bundle::{kit_override, resolve_bundle};
use crate::pipeline::stage3_price::{billed_kit_quantity, price_kit, price_line};

/// Resolve, bundle, price, total. A refused request gives an empty
/// quote; a configuration error aborts with no partial result.
pub fn assemble_quote(catalog: &Catalog, request: &SelectionRequest) -> Result<Quote, QuoteError> {
    if let Err(err) = request.validate(catalog) {
        tracing::warn!("{err}; returning empty quote");
        return Ok(Quote::empty(request.account_type, request.sample_count));
    }

    let order = resolve_order(catalog, request);

    // Panel kit demand stands unless a billed product brings its own kit.
    let mut billed: Tally<u32> = Tally::new();
    let mut kit_demand = order.sequencing_demand.clone();
    let mut raw_units = 0u64;
    for (product, count) in order.product_counts.iter() {
        let panel_kits = order.panel_kits_for(product);
        for line in resolve_bundle(catalog, product, count) {
            raw_units += u64::from(line.count) * u64::from(line.units_per_item);
            if let Some(moved) = kit_override(catalog, &line, panel_kits, count) {
                for (kit, qty) in &moved.released {
                    kit_demand.add(kit, -qty);
                }
                kit_demand.add(&moved.claimed.0, moved.claimed.1);
            }
            billed.add(&line.product_name, line.count);
        }
    }
    debug_assert_eq!(raw_units, order.product_counts.total());

    let account = request.account_type;
    let mut skipped = Vec::new();

    let mut product_costs = Vec::with_capacity(billed.len());
    for (product, count) in billed.iter() {
        keep_priced(
            price_line(catalog, product, count, account),
            &mut product_costs,
            &mut skipped,
        )?;
    }

    let mut sequencing_costs = Vec::with_capacity(kit_demand.len());
    for (kit, raw_qty) in kit_demand.iter() {
        let qty = billed_kit_quantity(raw_qty);
        if qty == 0 {
            continue;
        }
        tracing::debug!(kit, raw_qty, billed = qty, "rounded kit demand up");
        keep_priced(
            price_kit(catalog, kit, raw_qty, account),
            &mut sequencing_costs,
            &mut skipped,
        )?;
    }

    let total_cost = round_cents(
        product_costs
            .iter()
            .chain(sequencing_costs.iter())
            .map(|l| l.cost)
            .sum(),
    );
    let vat = round_cents(total_cost * account.vat_rate());

    tracing::info!(
        account = %account,
        samples = request.sample_count,
        products = product_costs.len(),
        kits = sequencing_costs.len(),
        total_cost,
        vat,
        "quote assembled"
    );

    Ok(Quote {
        account_type: account,
        sample_count: request.sample_count,
        panel_breakdown: order.panel_breakdown,
        product_costs,
        sequencing_costs,
        total_cost,
        vat,
        total_with_vat: round_cents(total_cost + vat),
        cost_per_sample: cost_per_sample(total_cost, request.sample_count),
        skipped,
    })
}

/// Unpriced items are skipped and recorded; anything else aborts.
fn keep_priced(
    result: Result<LineItem, QuoteError>,
    out: &mut Vec<LineItem>,
    skipped: &mut Vec<String>,
) -> Result<(), QuoteError> {
    match result {
        Ok(line) => out.push(line),
        Err(QuoteError::NotFound(err)) => {
            tracing::warn!("{err}; item left out of the quote");
            let name = match err {
                LookupError::Panel(name) | LookupError::Product(name) => name,
            };
            skipped.push(name);
        }
        Err(err) => return Err(err),
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_quote.rs"]
mod tests;
