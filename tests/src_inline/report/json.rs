use super::*;
use crate::model::account::AccountType;
use crate::report::tests::{sample_header, sample_quote};

fn parse(header: &QuoteHeader, quote: &Quote) -> serde_json::Value {
    let raw = render_quote_json(header, quote).unwrap();
    assert!(raw.ends_with('\n'));
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_document_carries_tool_and_version() {
    let doc = parse(&sample_header(), &sample_quote(AccountType::Internal));
    assert_eq!(doc["tool"], "labquote");
    assert_eq!(doc["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(doc["header"]["prepared_by"], "Ada");
    assert_eq!(doc["header"]["date"], "2025-03-14");
}

#[test]
fn test_quote_lines_and_totals() {
    let doc = parse(&sample_header(), &sample_quote(AccountType::Internal));
    let quote = &doc["quote"];
    assert_eq!(quote["account_type"], "Internal");
    assert_eq!(quote["sample_count"], 40);
    assert_eq!(quote["panel_breakdown"][1][0], "Inflammation");
    assert_eq!(quote["panel_breakdown"][1][1], 5);
    assert_eq!(quote["product_costs"][0]["name"], "Explore 384 Cardiometabolic x4");
    assert_eq!(quote["sequencing_costs"][0]["count"], 3);
    assert_eq!(quote["total_cost"], 12900.0);
    assert_eq!(quote["cost_per_sample"], 322.5);
    assert_eq!(quote["skipped"], serde_json::json!([]));
}

#[test]
fn test_cost_per_sample_not_applicable_is_a_string() {
    let quote = Quote::empty(AccountType::ExternalCommercial, 0);
    let doc = parse(&sample_header(), &quote);
    assert_eq!(doc["quote"]["cost_per_sample"], "not applicable");
    assert_eq!(doc["quote"]["account_type"], "External Commercial");
}
