use std::collections::BTreeMap;

pub mod defs;

pub use defs::{BundleRule, PanelEntry, PanelType, PricingRule, SequencingSpec, VolumeDiscount};

use crate::input::categories::Category;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("panel not found in catalog: {0}")]
    Panel(String),
    #[error("product not found in pricing rules: {0}")]
    Product(String),
}

/// Read-only reference data for one category. Safe to share across
/// quote computations.
#[derive(Debug, Clone)]
pub struct Catalog {
    category: Category,
    panel_order: Vec<String>,
    panels: BTreeMap<String, PanelEntry>,
    rules: BTreeMap<String, PricingRule>,
}

impl Catalog {
    /// Duplicate names keep the first entry.
    pub fn new(category: Category, panels: Vec<PanelEntry>, rules: Vec<PricingRule>) -> Self {
        let mut panel_order = Vec::with_capacity(panels.len());
        let mut panel_map = BTreeMap::new();
        for panel in panels {
            if panel_map.contains_key(&panel.panel_name) {
                tracing::warn!(panel = %panel.panel_name, "duplicate panel row; keeping first");
                continue;
            }
            panel_order.push(panel.panel_name.clone());
            panel_map.insert(panel.panel_name.clone(), panel);
        }

        let mut rule_map = BTreeMap::new();
        for rule in rules {
            if rule_map.contains_key(&rule.product_name) {
                tracing::warn!(product = %rule.product_name, "duplicate pricing rule; keeping first");
                continue;
            }
            rule_map.insert(rule.product_name.clone(), rule);
        }

        Self {
            category,
            panel_order,
            panels: panel_map,
            rules: rule_map,
        }
    }

    pub fn panel(&self, name: &str) -> Result<&PanelEntry, LookupError> {
        let key = name.trim();
        self.panels
            .get(key)
            .ok_or_else(|| LookupError::Panel(key.to_string()))
    }

    pub fn rule(&self, product_name: &str) -> Result<&PricingRule, LookupError> {
        let key = product_name.trim();
        self.rules
            .get(key)
            .ok_or_else(|| LookupError::Product(key.to_string()))
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn full_set_panel(&self) -> Option<&str> {
        self.category.full_set_panel.as_deref()
    }

    pub fn panels_of_type(&self, panel_type: PanelType) -> Vec<&PanelEntry> {
        self.panel_order
            .iter()
            .filter_map(|name| self.panels.get(name))
            .filter(|p| p.panel_type == panel_type)
            .collect()
    }

    pub fn combinable_panels(&self) -> Vec<&PanelEntry> {
        self.panels_of_type(PanelType::Combinable)
    }

    pub fn standalone_panels(&self) -> Vec<&PanelEntry> {
        self.panels_of_type(PanelType::Standalone)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/catalog/tests.rs"]
mod tests;
