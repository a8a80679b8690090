//! Pedestrian count workflow tests

use crate::helpers::{SURFACE, pedestrians_session};

#[test]
fn test_default_pass() {
    let session = pedestrians_session();
    let out = session.run_pass_uniform(SURFACE);
    assert_eq!(out.row_count, 4);
    assert_eq!(out.kpi("Total Pedestrians"), Some("2,700"));
    assert_eq!(out.kpi("Avg per Hour"), Some("675"));
    assert_eq!(out.kpi("Unique Days"), Some("4"));
    assert_eq!(out.kpi("Measured Rows"), Some("75.0%"));
    assert_eq!(out.kpi("Peak Hour"), Some("2022-06-11T14:00 (1,200)"));
    assert_eq!(out.kpi("Latest Timestamp"), Some("2022-06-13 08:00 UTC"));
    assert_eq!(out.charts.len(), 3);
}

#[test]
fn test_weekend_checkbox() {
    let mut session = pedestrians_session();
    session.toggle("day_type", "Weekend");
    let out = session.run_pass(&[]);
    assert_eq!(out.kpi("Total Pedestrians"), Some("700"));
    assert_eq!(out.kpi("Avg per Hour"), Some("350"));
}

#[test]
fn test_weather_and_year_filters() {
    let mut session = pedestrians_session();
    session.select("weather", ["snow"]);
    assert_eq!(session.run_pass(&[]).kpi("Total Pedestrians"), Some("800"));

    session.reset_filters();
    session.set_year_min(2022);
    assert_eq!(session.run_pass(&[]).kpi("Total Pedestrians"), Some("1,500"));
}

#[test]
fn test_monthly_trend() {
    let session = pedestrians_session();
    let out = session.run_pass(&[("monthly", SURFACE)]);
    assert_eq!(
        out.chart("monthly").unwrap().commands.texts(),
        ["1,500", "1,125", "750", "375", "0", "Pedestrians", "2021-12", "2022-06"]
    );
}

#[test]
fn test_story() {
    let session = pedestrians_session();
    let out = session.run_pass(&[]);
    assert_eq!(
        out.highlights,
        [
            "Most active segment: Bahnhofstrasse (Nord) (1,500 pedestrians).",
            "Busiest hour: 14:00 (2,400).",
            "Average hourly count at 20 C or warmer: 1,200.",
            "Average hourly count below 10 C: 600.",
            "Loaded data spans 2021 to 2022.",
        ]
    );
}
