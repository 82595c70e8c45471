use super::*;
use crate::model::account::AccountType;
use crate::report::tests::{sample_header, sample_quote};

#[test]
fn test_export_row_fields() {
    let row = export_row(&sample_header(), &sample_quote(AccountType::ExternalAcademic));
    assert_eq!(row[0], "2025-03-14");
    assert_eq!(row[1], "Ada");
    assert_eq!(row[3], "External Academic");
    assert_eq!(row[4], "Explore");
    assert_eq!(row[5], "40");
    assert_eq!(row[7], "5 Cardiometabolic, 5 Inflammation");
    assert_eq!(
        row[8],
        "1 Explore 384 Cardiometabolic x4, 1 Explore 384 Cardiometabolic, 5 Explore 384 Inflammation"
    );
    assert_eq!(row[9], "3 NovaSeq S1, 2 NovaSeq S2");
    assert_eq!(row[10], "18200.00");
    assert_eq!(row[11], "455.00");
    assert_eq!(row[12], "3640.00");
    assert_eq!(row[13], "21840.00");
}

#[test]
fn test_export_csv_has_header_and_one_row() {
    let mut buf = Vec::new();
    write_export(&mut buf, &sample_header(), &sample_quote(AccountType::Internal)).unwrap();

    let mut rdr = csv::Reader::from_reader(buf.as_slice());
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers, EXPORT_HEADER.to_vec());
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][12], "0.00");
    assert_eq!(&rows[0][13], "12900.00");
}

#[test]
fn test_export_zero_samples() {
    let quote = Quote::empty(AccountType::Internal, 0);
    let row = export_row(&sample_header(), &quote);
    assert_eq!(row[5], "0");
    assert_eq!(row[7], "");
    assert_eq!(row[11], "not applicable");
}

#[test]
fn test_export_file_name_is_path_safe() {
    let mut header = sample_header();
    header.prepared_for = "Dr X/Y".to_string();
    assert_eq!(export_file_name(&header), "AdaDr_X_Y2025-03-14.csv");
}
