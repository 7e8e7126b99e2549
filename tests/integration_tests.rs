use late_fees::utils::error::ReportError;
use late_fees::{fees_report, FeeConfig, FeesPipeline, LocalStorage, ReportEngine, ReportSettings};
use std::path::Path;
use tempfile::TempDir;

const BOOK_RETURNS: &str = "\
book_uid,isbn_13,patron_id,date_checkout,date_due,date_returned
B1,978-1-00-000001-1,P1,12/20/2019,01/01/2020,01/05/2020
B2,978-1-00-000002-2,P2,12/20/2019,01/01/2020,12/31/2019
B3,978-1-00-000003-3,P3,12/20/2019,01/01/2020,01/04/2020
B4,978-1-00-000004-4,P1,12/22/2019,01/05/2020,01/06/2020
B5,978-1-00-000005-5,P2,12/22/2019,01/05/2020,01/05/2020
";

fn write_input(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn output_path(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

#[test]
fn test_end_to_end_fees_report() {
    let temp_dir = TempDir::new().unwrap();
    let infile = write_input(&temp_dir, "book_returns.csv", BOOK_RETURNS);
    let outfile = output_path(&temp_dir, "book_fees.csv");

    let report = fees_report(&infile, &outfile).unwrap();

    assert_eq!(report.records_read, 5);
    assert_eq!(report.late_records, 3);
    assert_eq!(report.total_fees, "2.00");

    let content = std::fs::read_to_string(&outfile).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec!["patron_id,late_fees", "P1,1.25", "P2,0.00", "P3,0.75"]
    );
}

#[test]
fn test_single_late_record_costs_one_dollar() {
    let temp_dir = TempDir::new().unwrap();
    let infile = write_input(
        &temp_dir,
        "returns.csv",
        "label row\nB1,978-1,P1,12/20/2019,01/01/2020,01/05/2020\n",
    );
    let outfile = output_path(&temp_dir, "fees.csv");

    fees_report(&infile, &outfile).unwrap();

    let content = std::fs::read_to_string(&outfile).unwrap();
    assert!(content.lines().any(|line| line == "P1,1.00"));
}

#[test]
fn test_first_data_row_is_discarded() {
    let temp_dir = TempDir::new().unwrap();
    let infile = write_input(
        &temp_dir,
        "returns.csv",
        "B0,978-0,P0,12/01/2019,12/15/2019,12/31/2019\nB1,978-1,P1,12/20/2019,01/01/2020,01/01/2020\n",
    );
    let outfile = output_path(&temp_dir, "fees.csv");

    fees_report(&infile, &outfile).unwrap();

    let content = std::fs::read_to_string(&outfile).unwrap();
    assert_eq!(content, "patron_id,late_fees\r\nP1,0.00\r\n");
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let infile = output_path(&temp_dir, "does_not_exist.csv");
    let outfile = output_path(&temp_dir, "fees.csv");

    let err = fees_report(&infile, &outfile).unwrap_err();

    match err {
        ReportError::IoError(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!Path::new(&outfile).exists());
}

#[test]
fn test_malformed_date_leaves_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let infile = write_input(
        &temp_dir,
        "returns.csv",
        "skip\nB1,978-1,P1,12/20/2019,01/01/2020,01/05/2020\nB2,978-2,P2,12/20/2019,2020-01-01,01/05/2020\n",
    );
    let outfile = output_path(&temp_dir, "fees.csv");

    let err = fees_report(&infile, &outfile).unwrap_err();

    assert!(matches!(err, ReportError::DateParseError { ref value, .. } if value == "2020-01-01"));
    assert!(!Path::new(&outfile).exists());
}

#[test]
fn test_two_digit_year_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let infile = write_input(
        &temp_dir,
        "returns.csv",
        "skip\nB1,978-1,P1,12/20/2019,01/01/20,01/05/20\n",
    );
    let outfile = output_path(&temp_dir, "fees.csv");

    let err = fees_report(&infile, &outfile).unwrap_err();

    assert!(matches!(err, ReportError::DateParseError { ref value, .. } if value == "01/01/20"));
    assert!(!Path::new(&outfile).exists());
}

#[test]
fn test_engine_with_toml_settings() {
    let temp_dir = TempDir::new().unwrap();
    let infile = write_input(
        &temp_dir,
        "returns.csv",
        "B1,978-1,P7,2020-03-01,2020-03-10,2020-03-14\nB2,978-2,P8,2020-03-01,2020-03-10,2020-03-01\n",
    );
    let outfile = output_path(&temp_dir, "reports/fees.csv");

    let config = FeeConfig::from_toml_str(
        r#"
[fees]
daily_rate = "0.10"

[input]
date_format = "%Y-%m-%d"
skip_first_row = false

[output]
formats = ["csv", "json"]
"#,
    )
    .unwrap();

    let settings = ReportSettings::from_fee_config(infile, outfile.clone(), config);
    let engine = ReportEngine::new(FeesPipeline::new(LocalStorage::default(), settings));

    let written = engine.run().unwrap();
    assert_eq!(written, outfile);

    let content = std::fs::read_to_string(&outfile).unwrap();
    assert_eq!(content, "patron_id,late_fees\r\nP7,0.40\r\nP8,0.00\r\n");

    let summary_path = temp_dir.path().join("reports/fees.json");
    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(summary_path).unwrap()).unwrap();
    assert_eq!(summary["records_read"], 2);
    assert_eq!(summary["late_records"], 1);
    assert_eq!(summary["total_fees"], "0.40");
}
