use std::path::Path;

use crate::model::quote::{Quote, join_counts};
use crate::report::{QuoteHeader, format_money};

pub const EXPORT_HEADER: [&str; 14] = [
    "Date",
    "Prepared by",
    "Prepared for",
    "Account Type",
    "Category",
    "Number of Samples",
    "Notes",
    "Panels",
    "Products",
    "Sequencing Kits",
    "Total Cost",
    "Cost per sample",
    "VAT",
    "Total Including VAT",
];

/// The flat export row, in `EXPORT_HEADER` order.
pub fn export_row(header: &QuoteHeader, quote: &Quote) -> [String; 14] {
    [
        header.date.format("%Y-%m-%d").to_string(),
        header.prepared_by.clone(),
        header.prepared_for.clone(),
        quote.account_type.label().to_string(),
        header.category.clone(),
        quote.sample_count.to_string(),
        header.notes.clone(),
        join_counts(quote.panel_breakdown.iter()),
        join_counts(quote.product_costs.iter().map(|l| (l.name.as_str(), l.count))),
        join_counts(quote.sequencing_costs.iter().map(|l| (l.name.as_str(), l.count))),
        format_money(quote.total_cost),
        quote.cost_per_sample.to_string(),
        format_money(quote.vat),
        format_money(quote.total_with_vat),
    ]
}

pub fn write_export<W: std::io::Write>(
    writer: W,
    header: &QuoteHeader,
    quote: &Quote,
) -> std::io::Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(EXPORT_HEADER)?;
    w.write_record(export_row(header, quote))?;
    w.flush()
}

pub fn write_export_csv(path: &Path, header: &QuoteHeader, quote: &Quote) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_export(std::io::BufWriter::new(file), header, quote)
}

/// Download-style file name: prepared-by + prepared-for + date.
pub fn export_file_name(header: &QuoteHeader) -> String {
    let stem = format!(
        "{}{}{}",
        header.prepared_by,
        header.prepared_for,
        header.date.format("%Y-%m-%d")
    );
    let safe: String = stem
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect();
    format!("{safe}.csv")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/export.rs"]
mod tests;
