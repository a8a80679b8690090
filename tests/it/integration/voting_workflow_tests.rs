//! Voter turnout workflow tests

use crate::helpers::{SURFACE, voting_session};

#[test]
fn test_default_pass() {
    let session = voting_session();
    let out = session.run_pass_uniform(SURFACE);
    assert_eq!(out.row_count, 7);
    assert_eq!(out.kpi("Vote Dates"), Some("3"));
    assert_eq!(out.kpi("Avg Final Turnout"), Some("43.2%"));
    assert_eq!(out.kpi("Highest Final"), Some("2021-09-26 (46.0%)"));
    assert_eq!(out.kpi("Latest Vote"), Some("2023-06-18 (39.0%)"));
    assert_eq!(out.charts.len(), 3);
}

#[test]
fn test_year_range_narrows_final_rows() {
    let mut session = voting_session();
    session.set_year_min(2022);
    let out = session.run_pass(&[]);
    assert_eq!(out.row_count, 5);
    assert_eq!(out.kpi("Vote Dates"), Some("2"));
    assert_eq!(out.kpi("Avg Final Turnout"), Some("41.8%"));
}

#[test]
fn test_single_vote_date_build_up() {
    let mut session = voting_session();
    session.select("vote_date", ["2022-02-13"]);
    let out = session.run_pass(&[("build_up", SURFACE)]);
    assert_eq!(
        out.chart("build_up").unwrap().commands.texts(),
        ["100%", "75%", "50%", "25%", "0%", "Build-up turnout", "-7d", "-14d"]
    );
}

#[test]
fn test_top_dates_ranking() {
    let session = voting_session();
    let out = session.run_pass(&[("top_dates", SURFACE)]);
    assert_eq!(
        out.chart("top_dates").unwrap().commands.texts(),
        ["21-09-26", "46.0%", "22-02-13", "44.5%", "23-06-18", "39.0%"]
    );
}

#[test]
fn test_story() {
    let session = voting_session();
    let out = session.run_pass(&[]);
    assert_eq!(
        out.highlights,
        [
            "Final turnout changed by -7.0 pp from 2021-09-26 to 2023-06-18.",
            "Highest final turnout: 2021-09-26 (46.0%).",
            "Lowest final turnout: 2023-06-18 (39.0%).",
            "Average final turnout in view: 43.2%.",
        ]
    );
}

#[test]
fn test_reset_restores_both_phases() {
    let mut session = voting_session();
    session.toggle("phase", "final");
    assert_eq!(session.run_pass(&[]).kpi("Vote Dates"), Some("0"));
    session.reset_filters();
    assert_eq!(session.run_pass(&[]).kpi("Vote Dates"), Some("3"));
}
