use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::account::AccountType;
use crate::model::tally::Tally;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub name: String,
    pub count: u32,
    pub unit_price: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostPerSample {
    Amount(f64),
    NotApplicable,
}

impl fmt::Display for CostPerSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostPerSample::Amount(v) => write!(f, "{v:.2}"),
            CostPerSample::NotApplicable => f.write_str("not applicable"),
        }
    }
}

impl Serialize for CostPerSample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CostPerSample::Amount(v) => serializer.serialize_f64(*v),
            CostPerSample::NotApplicable => serializer.serialize_str("not applicable"),
        }
    }
}

/// Assembled once per request; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub account_type: AccountType,
    pub sample_count: u32,
    pub panel_breakdown: Tally<u32>,
    pub product_costs: Vec<LineItem>,
    pub sequencing_costs: Vec<LineItem>,
    pub total_cost: f64,
    pub vat: f64,
    pub total_with_vat: f64,
    pub cost_per_sample: CostPerSample,
    /// Billed products or kits that had no pricing rule.
    pub skipped: Vec<String>,
}

impl Quote {
    pub fn empty(account_type: AccountType, sample_count: u32) -> Self {
        Self {
            account_type,
            sample_count,
            panel_breakdown: Tally::new(),
            product_costs: Vec::new(),
            sequencing_costs: Vec::new(),
            total_cost: 0.0,
            vat: 0.0,
            total_with_vat: 0.0,
            cost_per_sample: cost_per_sample(0.0, sample_count),
            skipped: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.product_costs.is_empty() && self.sequencing_costs.is_empty()
    }
}

pub fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn cost_per_sample(total_cost: f64, sample_count: u32) -> CostPerSample {
    if sample_count == 0 {
        CostPerSample::NotApplicable
    } else {
        CostPerSample::Amount(round_cents(total_cost / f64::from(sample_count)))
    }
}

/// "count name" pairs joined with ", ".
pub fn join_counts<'a>(items: impl IntoIterator<Item = (&'a str, u32)>) -> String {
    items
        .into_iter()
        .map(|(name, count)| format!("{count} {name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/quote.rs"]
mod tests;
