use super::*;
use crate::fixtures::explore_catalog;

#[test]
fn test_new_dedupes_and_trims() {
    let req = SelectionRequest::new(
        ["Cardiometabolic", " Inflammation", "Cardiometabolic", ""],
        16,
        AccountType::Internal,
    );
    assert_eq!(req.selected_panels, vec!["Cardiometabolic", "Inflammation"]);
}

#[test]
fn test_validate_rejects_zero_samples_and_empty_selection() {
    let (_dir, cat) = explore_catalog();
    let zero = SelectionRequest::new(["Cardiometabolic"], 0, AccountType::Internal);
    assert!(matches!(zero.validate(&cat), Err(QuoteError::InvalidInput(_))));

    let empty = SelectionRequest::new(Vec::<String>::new(), 8, AccountType::Internal);
    assert!(matches!(empty.validate(&cat), Err(QuoteError::InvalidInput(_))));

    let ok = SelectionRequest::new(["Cardiometabolic"], 8, AccountType::Internal);
    assert!(ok.validate(&cat).is_ok());
}

#[test]
fn test_validate_rejects_two_standalone_panels() {
    let (_dir, cat) = explore_catalog();
    let req = SelectionRequest::new(
        ["Explore 3K", "Explore HT", "Cardiometabolic"],
        96,
        AccountType::Internal,
    );
    let err = req.validate(&cat).unwrap_err();
    assert!(err.to_string().contains("Explore 3K, Explore HT"));
}

#[test]
fn test_unknown_panels_do_not_fail_validation() {
    let (_dir, cat) = explore_catalog();
    let req = SelectionRequest::new(["Nope"], 8, AccountType::Internal);
    assert!(req.validate(&cat).is_ok());
}

#[test]
fn test_full_set_substitution() {
    let (_dir, cat) = explore_catalog();
    let req = SelectionRequest::new(
        ["Cardiometabolic", "Inflammation", "Oncology", "Broken"],
        16,
        AccountType::ExternalAcademic,
    );
    let swapped = req.apply_full_set(&cat);
    assert_eq!(swapped.selected_panels, vec!["Explore 3K"]);
    assert_eq!(swapped.sample_count, 16);
    assert_eq!(swapped.account_type, AccountType::ExternalAcademic);
}

#[test]
fn test_partial_selection_is_not_substituted() {
    let (_dir, cat) = explore_catalog();
    let req = SelectionRequest::new(["Cardiometabolic", "Inflammation"], 16, AccountType::Internal);
    let same = req.clone().apply_full_set(&cat);
    assert_eq!(same, req);
}

#[test]
fn test_with_sample_count() {
    let req = SelectionRequest::new(["A"], 20, AccountType::Internal);
    let snapped = req.with_sample_count(16);
    assert_eq!(snapped.sample_count, 16);
    assert_eq!(snapped.selected_panels, req.selected_panels);
}
