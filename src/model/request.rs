use serde::Serialize;

use crate::catalog::{Catalog, PanelType};
use crate::model::account::AccountType;
use crate::pipeline::QuoteError;

/// One quote's inputs. Panel names form a set: duplicates are dropped
/// on construction, first occurrence keeps its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionRequest {
    pub selected_panels: Vec<String>,
    pub sample_count: u32,
    pub account_type: AccountType,
}

impl SelectionRequest {
    pub fn new<I, S>(panels: I, sample_count: u32, account_type: AccountType) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected_panels: Vec<String> = Vec::new();
        for name in panels {
            let name = name.as_ref().trim();
            if !name.is_empty() && !selected_panels.iter().any(|p| p == name) {
                selected_panels.push(name.to_string());
            }
        }
        Self {
            selected_panels,
            sample_count,
            account_type,
        }
    }

    pub fn with_sample_count(&self, sample_count: u32) -> Self {
        Self {
            sample_count,
            ..self.clone()
        }
    }

    /// Rejects requests that must not be quoted: no samples, no panels,
    /// or more than one standalone panel.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), QuoteError> {
        if self.sample_count == 0 {
            return Err(QuoteError::InvalidInput(
                "sample count must be positive".to_string(),
            ));
        }
        if self.selected_panels.is_empty() {
            return Err(QuoteError::InvalidInput("no panels selected".to_string()));
        }
        let standalone = self
            .selected_panels
            .iter()
            .filter(|name| {
                catalog
                    .panel(name)
                    .is_ok_and(|p| p.panel_type == PanelType::Standalone)
            })
            .collect::<Vec<_>>();
        if standalone.len() > 1 {
            let names = standalone
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(QuoteError::InvalidInput(format!(
                "at most one standalone panel may be selected (got {names})"
            )));
        }
        Ok(())
    }

    /// Replaces a selection of every combinable panel with the
    /// category's full-set panel, when the category defines one.
    pub fn apply_full_set(self, catalog: &Catalog) -> Self {
        let Some(full_set) = catalog.full_set_panel() else {
            return self;
        };
        let combinable = catalog.combinable_panels();
        if combinable.is_empty()
            || !combinable
                .iter()
                .all(|p| self.selected_panels.contains(&p.panel_name))
        {
            return self;
        }

        tracing::info!(
            full_set,
            replaced = combinable.len(),
            "all combinable panels selected; substituting full-set panel"
        );
        let mut panels = vec![full_set.to_string()];
        panels.extend(
            self.selected_panels
                .iter()
                .filter(|name| !combinable.iter().any(|p| &p.panel_name == *name))
                .cloned(),
        );
        SelectionRequest::new(panels, self.sample_count, self.account_type)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/request.rs"]
mod tests;
