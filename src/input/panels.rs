use std::path::Path;

use crate::catalog::{PanelEntry, PanelType, SequencingSpec};
use crate::input::InputError;
use crate::input::table::{Row, Table, is_blank, parse_opt_f64, parse_opt_int, positive_u32, read_table};

pub const COL_PANEL_NAME: &str = "Panel Name";
pub const COL_PANEL_TYPE: &str = "Panel type";
pub const COL_BATCH_SIZE: &str = "Batch Size";
pub const COL_PRODUCT_NAME: &str = "Product Name";
pub const COL_SEQ_KIT: &str = "Sequencing Kit";
pub const COL_SEQ_QTY: &str = "Sequencing Qty per Batch";

pub fn load_panel_table(path: &Path) -> Result<Vec<PanelEntry>, InputError> {
    let table = read_table(path)?;
    parse_panel_table(&table)
}

/// Malformed panel rows degrade (no batch size, no sequencing) rather
/// than failing the whole catalog; resolution skips them later.
pub fn parse_panel_table(table: &Table) -> Result<Vec<PanelEntry>, InputError> {
    let name_col = table.require(COL_PANEL_NAME)?;
    let product_col = table.require(COL_PRODUCT_NAME)?;
    let type_col = table.column(COL_PANEL_TYPE);
    let batch_col = table.column(COL_BATCH_SIZE);
    let kit_col = table.column(COL_SEQ_KIT);
    let qty_col = table.column(COL_SEQ_QTY);

    let mut panels = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let panel_name = row.get(Some(name_col));
        if panel_name.is_empty() {
            tracing::warn!(line = row.line, "panel row has no name; skipping");
            continue;
        }

        let type_cell = row.get(type_col);
        let Some(panel_type) = PanelType::parse(type_cell) else {
            tracing::warn!(
                line = row.line,
                panel = panel_name,
                panel_type = type_cell,
                "unknown panel type; skipping"
            );
            continue;
        };

        panels.push(PanelEntry {
            panel_name: panel_name.to_string(),
            panel_type,
            batch_size: parse_batch_size(row, batch_col, panel_name),
            product_name: row.get(Some(product_col)).to_string(),
            sequencing: parse_sequencing(row, kit_col, qty_col, panel_name),
        });
    }
    Ok(panels)
}

fn parse_batch_size(row: &Row, col: Option<usize>, panel: &str) -> Option<u32> {
    match parse_opt_int(row.get(col)) {
        Ok(Some(v)) => {
            let size = positive_u32(v);
            if size.is_none() {
                tracing::warn!(line = row.line, panel, batch_size = v, "non-positive batch size");
            }
            size
        }
        Ok(None) => {
            tracing::warn!(line = row.line, panel, "missing batch size");
            None
        }
        Err(msg) => {
            tracing::warn!(line = row.line, panel, "bad batch size: {msg}");
            None
        }
    }
}

pub(crate) fn parse_sequencing(
    row: &Row,
    kit_col: Option<usize>,
    qty_col: Option<usize>,
    owner: &str,
) -> Option<SequencingSpec> {
    let kit = row.get(kit_col);
    if is_blank(kit) {
        return None;
    }
    match parse_opt_f64(row.get(qty_col)) {
        Ok(Some(qty)) if qty >= 0.0 => Some(SequencingSpec {
            kit_name: kit.to_string(),
            qty_per_unit: qty,
        }),
        Ok(Some(qty)) => {
            tracing::warn!(line = row.line, owner, qty, "negative sequencing quantity; ignoring kit");
            None
        }
        Ok(None) => {
            tracing::warn!(line = row.line, owner, kit, "sequencing kit without quantity; ignoring kit");
            None
        }
        Err(msg) => {
            tracing::warn!(line = row.line, owner, kit, "bad sequencing quantity: {msg}");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/panels.rs"]
mod tests;
