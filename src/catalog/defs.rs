use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::account::AccountType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelType {
    Combinable,
    Standalone,
}

impl PanelType {
    pub fn parse(cell: &str) -> Option<PanelType> {
        match cell.trim().to_ascii_lowercase().as_str() {
            "combinable" => Some(PanelType::Combinable),
            "standalone" => Some(PanelType::Standalone),
            _ => None,
        }
    }
}

/// Kit consumed per unit of something billed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequencingSpec {
    pub kit_name: String,
    pub qty_per_unit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelEntry {
    pub panel_name: String,
    pub panel_type: PanelType,
    /// `None` when the catalog cell is missing, malformed or non-positive.
    pub batch_size: Option<u32>,
    pub product_name: String,
    /// Per batch of this panel.
    pub sequencing: Option<SequencingSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleRule {
    pub bundle_size: u32,
    pub bundle_product_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeDiscount {
    pub threshold: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRule {
    pub product_name: String,
    pub prices: BTreeMap<AccountType, f64>,
    pub discount: Option<VolumeDiscount>,
    pub bundle: Option<BundleRule>,
    /// Per unit of this product; takes precedence over the panel's kit.
    pub sequencing_override: Option<SequencingSpec>,
}

impl PricingRule {
    pub fn unit_price(&self, account: AccountType) -> Option<f64> {
        self.prices.get(&account).copied()
    }
}
