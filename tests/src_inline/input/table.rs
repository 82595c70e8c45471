use std::io::Write;

use super::*;

fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_read_table_trims_and_skips_blank_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "t.csv",
        " Panel Name , Batch Size \n Cardio , 8 \n,\nOncology,16\n",
    );
    let table = read_table(&path).unwrap();
    assert_eq!(table.headers, vec!["Panel Name", "Batch Size"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].get(Some(0)), "Cardio");
    assert_eq!(table.rows[0].get(Some(1)), "8");
    assert_eq!(table.rows[1].get(Some(0)), "Oncology");
    assert_eq!(table.rows[1].get(None), "");
    assert_eq!(table.rows[1].get(Some(7)), "");
}

#[test]
fn test_read_table_gz() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.csv.gz");
    let file = std::fs::File::create(&path).unwrap();
    let mut enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    enc.write_all(b"Product Name,Internal Price\nKit A,10\n").unwrap();
    enc.finish().unwrap();

    let table = read_table(&path).unwrap();
    assert_eq!(table.column("Internal Price"), Some(1));
    assert_eq!(table.rows[0].get(Some(0)), "Kit A");
}

#[test]
fn test_require_reports_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "t.csv", "A,B\n1,2\n");
    let table = read_table(&path).unwrap();
    assert_eq!(table.require("B").unwrap(), 1);
    let err = table.require("C").unwrap_err();
    assert!(matches!(err, InputError::MissingColumn { ref column, .. } if column == "C"));
}

#[test]
fn test_numeric_cells() {
    assert_eq!(parse_opt_f64("").unwrap(), None);
    assert_eq!(parse_opt_f64("NaN").unwrap(), None);
    assert_eq!(parse_opt_f64("1.5").unwrap(), Some(1.5));
    assert!(parse_opt_f64("abc").is_err());
    assert!(parse_opt_f64("inf").is_err());

    assert_eq!(parse_opt_int("8.0").unwrap(), Some(8));
    assert_eq!(parse_opt_int("-3").unwrap(), Some(-3));
    assert!(parse_opt_int("8.5").is_err());

    assert_eq!(positive_u32(8), Some(8));
    assert_eq!(positive_u32(0), None);
    assert_eq!(positive_u32(-1), None);
}
