use super::*;
use crate::fixtures::explore_catalog;
use crate::model::account::AccountType;
use crate::model::request::SelectionRequest;
use crate::pipeline::stage4_quote::assemble_quote;

pub(crate) fn sample_header() -> QuoteHeader {
    QuoteHeader {
        date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        prepared_by: "Ada".to_string(),
        prepared_for: "lab@example.org".to_string(),
        category: "Explore".to_string(),
        notes: "pilot run".to_string(),
    }
}

pub(crate) fn sample_quote(account: AccountType) -> Quote {
    let (_dir, cat) = explore_catalog();
    let req = SelectionRequest::new(["Cardiometabolic", "Inflammation"], 40, account);
    assemble_quote(&cat, &req).unwrap()
}

#[test]
fn test_write_reports_creates_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/out");
    let paths = write_reports(
        &sample_header(),
        &sample_quote(AccountType::ExternalAcademic),
        &out,
    )
    .unwrap();

    assert_eq!(
        paths.csv.file_name().unwrap().to_str().unwrap(),
        "Adalab_example.org2025-03-14.csv"
    );
    assert!(paths.csv.exists());
    assert!(paths.json.exists());
    assert!(paths.text.exists());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.json).unwrap()).unwrap();
    assert_eq!(json["tool"], "labquote");
    assert_eq!(json["header"]["date"], "2025-03-14");
    assert_eq!(json["quote"]["account_type"], "External Academic");
    assert_eq!(json["quote"]["total_cost"], 18200.0);
    assert_eq!(json["quote"]["vat"], 3640.0);
    assert_eq!(json["quote"]["panel_breakdown"][0][0], "Cardiometabolic");
}

#[test]
fn test_format_money() {
    assert_eq!(format_money(0.0), "0.00");
    assert_eq!(format_money(1080.0), "1080.00");
    assert_eq!(format_money(12.346), "12.35");
}
