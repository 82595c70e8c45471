use serde::Serialize;

use crate::catalog::{Catalog, SequencingSpec};
use crate::model::request::SelectionRequest;
use crate::model::tally::Tally;

/// One panel's kit draw behind a product.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelKit {
    pub spec: SequencingSpec,
    pub batches: u32,
}

/// Raw (pre-bundle) counts for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderResolution {
    pub panel_breakdown: Tally<u32>,
    pub product_counts: Tally<u32>,
    /// Unrounded kit demand, `batches * qty` summed over every panel.
    pub sequencing_demand: Tally<f64>,
    /// Panel kits behind each product, in selection order.
    pub product_kits: Vec<(String, Vec<PanelKit>)>,
}

impl OrderResolution {
    pub fn panel_kits_for(&self, product: &str) -> &[PanelKit] {
        self.product_kits
            .iter()
            .find(|(p, _)| p == product)
            .map(|(_, kits)| kits.as_slice())
            .unwrap_or_default()
    }
}

/// Whole batches only; the remainder of `sample_count` is never billed.
pub fn billed_batches(sample_count: u32, batch_size: u32) -> u32 {
    sample_count / batch_size
}

pub fn resolve_order(catalog: &Catalog, request: &SelectionRequest) -> OrderResolution {
    let mut out = OrderResolution::default();

    for name in &request.selected_panels {
        let entry = match catalog.panel(name) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(panel = %name, "{err}; skipping");
                continue;
            }
        };
        let Some(batch_size) = entry.batch_size else {
            tracing::warn!(panel = %name, "panel has no usable batch size; skipping");
            continue;
        };

        let batches = billed_batches(request.sample_count, batch_size);
        tracing::debug!(
            panel = %name,
            batch_size,
            batches,
            unbilled_samples = request.sample_count % batch_size,
            "resolved panel"
        );

        out.panel_breakdown.add(&entry.panel_name, batches);
        out.product_counts.add(&entry.product_name, batches);

        if let Some(seq) = &entry.sequencing {
            out.sequencing_demand
                .add(&seq.kit_name, f64::from(batches) * seq.qty_per_unit);
            if batches > 0 {
                let kit = PanelKit {
                    spec: seq.clone(),
                    batches,
                };
                match out
                    .product_kits
                    .iter_mut()
                    .find(|(p, _)| *p == entry.product_name)
                {
                    Some((_, kits)) => kits.push(kit),
                    None => out.product_kits.push((entry.product_name.clone(), vec![kit])),
                }
            }
        }
    }

    out
}

/// Outcome of checking a sample count against the selected panels'
/// batch sizes. `smaller` is absent when it would be zero samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleCountChoice {
    Exact { sample_count: u32 },
    Snap { smaller: Option<u32>, larger: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SnapDirection {
    Smaller,
    Larger,
}

impl SampleCountChoice {
    pub fn pick(self, direction: Option<SnapDirection>) -> Option<u32> {
        match (self, direction) {
            (SampleCountChoice::Exact { sample_count }, _) => Some(sample_count),
            (SampleCountChoice::Snap { smaller, .. }, Some(SnapDirection::Smaller)) => smaller,
            (SampleCountChoice::Snap { larger, .. }, Some(SnapDirection::Larger)) => Some(larger),
            (SampleCountChoice::Snap { .. }, None) => None,
        }
    }
}

/// Candidate sample counts for panels whose batch sizes do not all
/// divide `sample_count`. Unknown panels and panels without a batch
/// size are ignored. The caller picks; the engine never does.
pub fn sample_count_options(
    catalog: &Catalog,
    panels: &[String],
    sample_count: u32,
) -> SampleCountChoice {
    let sizes = panels
        .iter()
        .filter_map(|name| catalog.panel(name).ok())
        .filter_map(|p| p.batch_size)
        .collect::<Vec<_>>();

    if sizes.iter().all(|b| sample_count % b == 0) {
        return SampleCountChoice::Exact { sample_count };
    }

    let smaller = sizes
        .iter()
        .map(|b| b * (sample_count / b))
        .max()
        .filter(|&n| n > 0);
    let larger = sizes
        .iter()
        .map(|b| b.saturating_mul(sample_count / b + 1))
        .min()
        .unwrap_or(sample_count);
    SampleCountChoice::Snap { smaller, larger }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_order.rs"]
mod tests;
