//! Voting recommendation workflow tests

use crate::helpers::{SURFACE, slogans_session};
use civicboard::chart::DrawCommand;

#[test]
fn test_stance_checkboxes() {
    let mut session = slogans_session();
    session.select("stance", ["NEIN"]);
    let out = session.run_pass(&[]);
    assert_eq!(out.row_count, 2);
    assert_eq!(out.kpi("JA vs NEIN"), Some("0.0% / 100.0%"));
    assert_eq!(out.kpi("Distinct Issues"), Some("2"));
}

#[test]
fn test_heatmap_lists_all_parties_without_selection() {
    let session = slogans_session();
    let out = session.run_pass(&[("representation", SURFACE)]);
    let texts = out.chart("representation").unwrap().commands.texts();
    assert_eq!(
        texts,
        ["FDP", "GLP", "Gruene", "SP", "SVP", "2022", "2023", "Darker cells = more party positions"]
    );
}

#[test]
fn test_topic_trends_use_deduplicated_issues() {
    let session = slogans_session();
    let out = session.run_pass(&[("topics", SURFACE)]);
    let list = &out.chart("topics").unwrap().commands;

    let series: Vec<Vec<f64>> = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Polyline { points, .. } => Some(points.iter().map(|p| p.y).collect()),
            _ => None,
        })
        .collect();
    assert_eq!(series.len(), 3);

    let texts = list.texts();
    for topic in ["Housing", "Mobility", "Climate"] {
        assert!(texts.contains(&topic), "missing topic {}", topic);
    }
}

#[test]
fn test_keywords_chart() {
    let session = slogans_session();
    let out = session.run_pass(&[("keywords", SURFACE)]);
    let texts = out.chart("keywords").unwrap().commands.texts();
    // twelve bars, each with a name and a value; ties keep first-seen order
    assert_eq!(texts.len(), 24);
    assert_eq!(&texts[..2], ["kommunale", "1"]);
    assert!(!texts.contains(&"und"));
}

#[test]
fn test_highlights() {
    let session = slogans_session();
    let out = session.run_pass(&[]);
    assert_eq!(
        out.highlights,
        [
            "3 ballot issues in the current selection.",
            "Most common topic: Housing (1 issues).",
            "Most represented party: SP (3 positions).",
            "Issues 2022 vs 2023: 1 vs 2.",
            "Most discussed: Velobahn Nord (1 JA, 1 NEIN).",
        ]
    );
}
