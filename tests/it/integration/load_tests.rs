//! Loading, reloading and failure handling

use crate::helpers::{DOGS_CSV, MIGRATION_CSV, dogs_session};
use civicboard::DataError;
use civicboard::datasets::{Dogs, Migration};
use civicboard::chart::SurfaceSize;
use civicboard::{Session, YearRange};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_summary() {
    let mut session = Session::new(Dogs::new());
    let summary = session.load_text(DOGS_CSV, "dogs.csv").unwrap();
    assert_eq!(summary.rows, 6);
    assert_eq!(summary.rejected, 0);
    assert_eq!(summary.years, Some(YearRange::new(2019, 2021)));
    assert_eq!(session.status(), Some("Loaded dogs.csv: 6 rows (0 rejected)."));
}

#[test]
fn test_failed_reload_keeps_previous_rows_and_filters() {
    let mut session = dogs_session();
    session.select("kreis", ["Kreis 3"]);
    let before = session.snapshot();

    let err = session.load_text("StichtagDatJahr,HID\nabc,1\n", "broken.csv").unwrap_err();
    assert!(matches!(err, DataError::NoRows { rejected: 1 }));
    assert_eq!(session.rows().len(), 6);
    assert!(std::sync::Arc::ptr_eq(&before, &session.snapshot()));
    assert_eq!(session.filtered().len(), 3);
    assert_eq!(
        session.status(),
        Some("Could not load broken.csv: No usable rows (1 records rejected)")
    );
}

#[test]
fn test_successful_reload_resets_filters() {
    let mut session = dogs_session();
    session.select("kreis", ["Kreis 3"]);
    session
        .load_text("StichtagDatJahr,KreisLang,AnzHunde\n2024,Kreis 9,4\n", "dogs-2024.csv")
        .unwrap();
    assert_eq!(session.years(), [2024]);
    assert_eq!(session.filtered().len(), 1);
    assert_eq!(session.filters().years, YearRange::new(2024, 2024));
}

#[test]
fn test_empty_and_headerless_input() {
    let mut session = Session::new(Dogs::new());
    assert!(matches!(session.load_text("  \n", "empty.csv"), Err(DataError::EmptyFile)));
    assert!(matches!(session.load_text(",,\n1,2,3\n", "blank.csv"), Err(DataError::NoColumns)));
    assert!(session.snapshot().is_empty());
}

#[test]
fn test_missing_required_column() {
    let mut session = Session::new(Migration::new());
    let err = session.load_text("EreignisDatJahr,AnzZuzuWir\n2020,3\n", "migration.csv").unwrap_err();
    match err {
        DataError::MissingColumn(column) => assert_eq!(column, "EreignisDatMM"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_file_and_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("migration.csv");
    fs::write(&path, MIGRATION_CSV).unwrap();

    let mut session = Session::new(Migration::new());
    let summary = session.load_file(&path).unwrap();
    assert_eq!(summary.source, "migration.csv");
    assert_eq!(summary.rows, 5);

    let missing = dir.path().join("absent.csv");
    let err = session.load_file(&missing).unwrap_err();
    assert!(err.to_string().contains("absent.csv"));
    assert_eq!(session.rows().len(), 5);
    assert!(session.status().unwrap().starts_with("Could not load absent.csv"));
}

#[test]
fn test_double_encoded_text_is_repaired() {
    let csv = "StichtagDatJahr,SexLang,KreisLang,AnzHunde\n2020,mÃ¤nnlich,ZÃ¼rich,1\n";
    let mut session = Session::new(Dogs::new());
    session.load_text(csv, "dogs.csv").unwrap();
    assert_eq!(session.rows()[0].owner_sex, "männlich");
    assert_eq!(session.categories("kreis"), ["Zürich"]);
}

#[test]
fn test_invalid_utf8_bytes_are_replaced() {
    let mut bytes = b"StichtagDatJahr,KreisLang,AnzHunde\n2020,Kreis ".to_vec();
    bytes.push(0xff);
    bytes.extend_from_slice(b",2\n");
    let mut session = Session::new(Dogs::new());
    let summary = session.load_bytes(&bytes, "dogs.csv").unwrap();
    assert_eq!(summary.rows, 1);
    assert_eq!(session.rows()[0].kreis, "Kreis \u{fffd}");
}

#[test]
fn test_recorded_host_failure_keeps_snapshot() {
    let mut session = dogs_session();
    session.record_load_failure("https://data.example/dogs.csv", &"HTTP 503");
    assert_eq!(session.rows().len(), 6);
    assert_eq!(
        session.status(),
        Some("Could not load https://data.example/dogs.csv: HTTP 503")
    );
}

#[test]
fn test_out_of_domain_year_is_rejected() {
    let csv = format!(
        "{}20230101,15,weiblich,30- bis 39-Jährige,Kreis 3,Wiedikon,Pudel,K,2,weiblich,1\n",
        DOGS_CSV
    );
    let mut session = Session::new(Dogs::new());
    let summary = session.load_text(&csv, "dogs.csv").unwrap();
    assert_eq!(summary.rows, 6);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.years, Some(YearRange::new(2019, 2021)));

    let out = session.run_pass(&[("trend", SurfaceSize::new(640.0, 320.0))]);
    let texts = out.chart("trend").unwrap().commands.texts();
    let years: Vec<_> = texts.into_iter().filter(|t| t.starts_with("20")).collect();
    assert_eq!(years, ["2019", "2020", "2021"]);
}
