use crate::model::account::VAT_RATE;
use crate::model::quote::{LineItem, Quote};
use crate::report::{QuoteHeader, format_money};

pub fn render_quote_text(header: &QuoteHeader, quote: &Quote) -> String {
    let mut out = String::new();

    out.push_str("Panel Price Quote\n");
    out.push_str("=================\n\n");
    out.push_str(&format!("Date: {}\n", header.date.format("%Y-%m-%d")));
    out.push_str(&format!("Prepared by: {}\n", header.prepared_by));
    out.push_str(&format!("Prepared for: {}\n", header.prepared_for));
    out.push_str(&format!("Category: {}\n", header.category));
    out.push_str(&format!("Account type: {}\n", quote.account_type));
    out.push_str(&format!("Number of samples: {}\n", quote.sample_count));
    if !header.notes.is_empty() {
        out.push_str(&format!("Notes: {}\n", header.notes));
    }
    out.push('\n');

    out.push_str("Panel breakdown\n");
    if quote.panel_breakdown.is_empty() {
        out.push_str("  (none)\n");
    }
    for (panel, count) in quote.panel_breakdown.iter() {
        out.push_str(&format!("  Panel: {panel}, Quantity: {count}\n"));
    }
    out.push('\n');

    out.push_str("Products and associated costs\n");
    push_lines(&mut out, &quote.product_costs, "No products found.");
    out.push('\n');

    out.push_str("Sequencing kits\n");
    push_lines(&mut out, &quote.sequencing_costs, "No sequencing kits.");
    out.push('\n');

    if !quote.skipped.is_empty() {
        out.push_str(&format!(
            "Not priced (no pricing rule): {}\n\n",
            quote.skipped.join(", ")
        ));
    }

    out.push_str(&format!(
        "Total cost ({}): {}\n",
        quote.account_type,
        format_money(quote.total_cost)
    ));
    if quote.account_type.vat_liable() {
        out.push_str(&format!(
            "VAT ({:.0}%): {}\n",
            VAT_RATE * 100.0,
            format_money(quote.vat)
        ));
        out.push_str(&format!(
            "Total cost including VAT: {}\n",
            format_money(quote.total_with_vat)
        ));
    }
    out.push_str(&format!("Cost per sample: {}\n", quote.cost_per_sample));
    out
}

fn push_lines(out: &mut String, lines: &[LineItem], empty: &str) {
    if lines.is_empty() {
        out.push_str(&format!("  {empty}\n"));
        return;
    }
    for line in lines {
        out.push_str(&format!(
            "  {}: {} x {} = {}\n",
            line.name,
            line.count,
            format_money(line.unit_price),
            format_money(line.cost)
        ));
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
