//! Dog register workflow tests

use crate::helpers::{SURFACE, dogs_session};
use civicboard::chart::DrawCommand;

#[test]
fn test_full_pass_produces_every_chart() {
    let session = dogs_session();
    let out = session.run_pass_uniform(SURFACE);
    let ids: Vec<&str> = out.charts.iter().map(|c| c.id).collect();
    assert_eq!(ids, ["trend", "breeds", "owner_age"]);
    assert_eq!(out.row_count, 6);
    assert_eq!(out.kpis.len(), 5);
}

#[test]
fn test_district_filter_updates_kpis_and_charts() {
    let mut session = dogs_session();
    session.select("kreis", ["Kreis 7"]);
    let out = session.run_pass(&[("breeds", SURFACE)]);

    assert_eq!(out.row_count, 2);
    assert_eq!(out.kpi("Dogs (Visible)"), Some("2"));
    assert_eq!(out.kpi("Unique HIDs"), Some("2"));
    assert_eq!(out.chart("breeds").unwrap().commands.texts(), ["Chihuahua", "2"]);
}

#[test]
fn test_owner_age_bars_follow_band_order() {
    let session = dogs_session();
    let out = session.run_pass(&[("owner_age", SURFACE)]);
    let labels: Vec<&str> = out
        .chart("owner_age")
        .unwrap()
        .commands
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::RotatedText { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        labels,
        ["unter 20-Jährige", "30- bis 39-Jährige", "60- bis 69-Jährige", "80- bis 89-Jährige", "Unbekannt"]
    );
}

#[test]
fn test_year_window_narrows_everything() {
    let mut session = dogs_session();
    session.set_year_min(2021);
    let out = session.run_pass(&[("trend", SURFACE)]);
    assert_eq!(out.row_count, 2);
    assert_eq!(out.kpi("Peak Year"), Some("2021 (2)"));
    let texts = out.chart("trend").unwrap().commands.texts();
    assert_eq!(texts.last(), Some(&"2021"));
}

#[test]
fn test_reset_restores_defaults() {
    let mut session = dogs_session();
    session.select("dog_sex", ["männlich"]);
    session.set_year_max(2019);
    assert_ne!(session.filtered().len(), 6);

    session.reset_filters();
    assert_eq!(session.filtered().len(), 6);
    assert_eq!(session.filters(), &session.default_filters());
}
