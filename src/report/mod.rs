use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

pub mod export;
pub mod json;
pub mod merge;
pub mod text;

use crate::model::quote::Quote;

/// Who the quote is for and by whom; not part of the pricing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteHeader {
    pub date: NaiveDate,
    pub prepared_by: String,
    pub prepared_for: String,
    pub category: String,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub json: PathBuf,
    pub text: PathBuf,
}

pub fn format_money(v: f64) -> String {
    format!("{v:.2}")
}

pub fn write_reports(
    header: &QuoteHeader,
    quote: &Quote,
    out_dir: &Path,
) -> std::io::Result<ReportPaths> {
    fs::create_dir_all(out_dir)?;

    let paths = ReportPaths {
        csv: out_dir.join(export::export_file_name(header)),
        json: out_dir.join("quote.json"),
        text: out_dir.join("quote.txt"),
    };

    export::write_export_csv(&paths.csv, header, quote)?;
    fs::write(&paths.json, json::render_quote_json(header, quote)?)?;
    fs::write(&paths.text, text::render_quote_text(header, quote))?;

    tracing::info!(out_dir = %out_dir.display(), "reports written");
    Ok(paths)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
