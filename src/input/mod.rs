use std::path::{Path, PathBuf};

pub mod categories;
pub mod panels;
pub mod rules;
pub mod table;

use categories::{Category, load_categories};
use panels::load_panel_table;
use rules::load_rules_table;

use crate::catalog::Catalog;

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const RULES_FILE: &str = "pricing_rules.csv";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("missing column '{column}' in {path}")]
    MissingColumn { path: String, column: String },
    #[error("malformed value in {path} line {line}: {msg}")]
    Malformed { path: String, line: u64, msg: String },
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Loads one category of a catalog directory: the category's panel
/// table plus the shared pricing rules.
pub fn load_catalog(catalog_dir: &Path, category_name: &str) -> Result<Catalog, InputError> {
    let categories = load_categories(&find_table(catalog_dir, CATEGORIES_FILE)?)?;
    let category = select_category(&categories, category_name)?;

    let panels_path = catalog_dir.join(&category.prices_file);
    let rules_path = find_table(catalog_dir, RULES_FILE)?;

    tracing::info!(
        category = %category.name,
        panels = %panels_path.display(),
        rules = %rules_path.display(),
        "loading catalog"
    );

    let panels = load_panel_table(&panels_path)?;
    let rules = load_rules_table(&rules_path)?;
    Ok(Catalog::new(category, panels, rules))
}

pub fn list_categories(catalog_dir: &Path) -> Result<Vec<Category>, InputError> {
    load_categories(&find_table(catalog_dir, CATEGORIES_FILE)?)
}

fn select_category(categories: &[Category], name: &str) -> Result<Category, InputError> {
    let wanted = name.trim();
    categories
        .iter()
        .find(|c| c.name == wanted)
        .cloned()
        .ok_or_else(|| InputError::UnknownCategory(wanted.to_string()))
}

/// Resolves `name` inside `dir`, accepting a gzip-compressed sibling.
pub fn find_table(dir: &Path, name: &str) -> Result<PathBuf, InputError> {
    let plain = dir.join(name);
    if plain.exists() {
        return Ok(plain);
    }
    let gz = dir.join(format!("{name}.gz"));
    if gz.exists() {
        return Ok(gz);
    }
    Err(InputError::MissingInput(plain.display().to_string()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
