//! In-migration workflow tests

use crate::helpers::{SURFACE, migration_session};

#[test]
fn test_default_pass() {
    let session = migration_session();
    let out = session.run_pass_uniform(SURFACE);
    assert_eq!(out.row_count, 5);
    assert_eq!(out.kpi("Total Arrivals"), Some("50"));
    assert_eq!(out.kpi("Peak Year"), Some("2018 (32)"));
    assert_eq!(out.kpi("Foreign Share"), Some("68.0%"));
    assert_eq!(out.kpi("Active Quarters"), Some("4"));
    assert_eq!(out.charts.len(), 3);
}

#[test]
fn test_origin_checkbox_removes_series_mass() {
    let mut session = migration_session();
    session.toggle("origin", "Ausland");
    let out = session.run_pass(&[]);
    assert_eq!(out.kpi("Total Arrivals"), Some("16"));
    assert_eq!(out.kpi("Foreign Share"), Some("0.0%"));
}

#[test]
fn test_quarter_ranking() {
    let session = migration_session();
    let out = session.run_pass(&[("quarters", SURFACE)]);
    let texts = out.chart("quarters").unwrap().commands.texts();
    assert_eq!(
        texts,
        ["Hard", "20", "Langstrasse", "18", "Gewerbeschule", "8", "Escher Wyss", "4"]
    );
}

#[test]
fn test_age_profile_follows_peak_year_of_selection() {
    let mut session = migration_session();
    session.set_year_min(2019);
    let out = session.run_pass(&[("age_profile", SURFACE)]);
    // 2019 (12) beats 2020 (6); bands in lexical order
    assert_eq!(
        out.chart("age_profile").unwrap().commands.texts(),
        ["0-19", "4", "40-59", "8"]
    );
}

#[test]
fn test_growth_highlight() {
    let session = migration_session();
    let out = session.run_pass(&[]);
    assert_eq!(out.highlights[0], "50 arrivals in the current selection.");
    assert!(out.highlights.contains(&"Change 2018 to 2020: -81.3%.".to_string()));
    assert!(out.highlights.contains(&"Top district: Kreis 4 (38).".to_string()));
}
