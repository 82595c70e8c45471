use std::path::Path;

use serde::Serialize;

use crate::input::InputError;
use crate::input::table::{Table, is_blank, read_table};

pub const COL_CATEGORY_NAME: &str = "Category Name";
pub const COL_PRICES_FILE: &str = "Prices File";
pub const COL_FULL_SET_PANEL: &str = "Full Set Panel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    /// Panel table, relative to the catalog directory.
    pub prices_file: String,
    /// Panel that replaces a selection of every combinable panel.
    pub full_set_panel: Option<String>,
}

pub fn load_categories(path: &Path) -> Result<Vec<Category>, InputError> {
    let table = read_table(path)?;
    parse_categories(&table)
}

pub fn parse_categories(table: &Table) -> Result<Vec<Category>, InputError> {
    let name_col = table.require(COL_CATEGORY_NAME)?;
    let file_col = table.require(COL_PRICES_FILE)?;
    let full_col = table.column(COL_FULL_SET_PANEL);

    let mut out = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let name = row.get(Some(name_col));
        let file = row.get(Some(file_col));
        if name.is_empty() || file.is_empty() {
            return Err(table.malformed(row, "category needs a name and a prices file"));
        }
        let full = row.get(full_col);
        out.push(Category {
            name: name.to_string(),
            prices_file: file.to_string(),
            full_set_panel: (!is_blank(full)).then(|| full.to_string()),
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/categories.rs"]
mod tests;
