//! Unit tests for display formatting as it reaches KPIs and chart labels.

use crate::helpers::{DOGS_CSV, SURFACE};
use civicboard::datasets::Dogs;
use civicboard::format::{NumberFormat, round_half_up, truncate};
use civicboard::{Session, Settings};

fn swiss_settings() -> Settings {
    Settings {
        format: NumberFormat {
            thousands_separator: "'".to_string(),
            decimal_separator: ",".to_string(),
            placeholder: "n/a".to_string(),
        },
        ..Settings::default()
    }
}

#[test]
fn test_settings_format_reaches_kpis() {
    let mut session = Session::with_settings(Dogs::new(), swiss_settings());
    session.load_text(DOGS_CSV, "dogs.csv").unwrap();
    let out = session.run_pass(&[]);
    assert_eq!(out.kpi("Avg Dog Age"), Some("3,3 yrs"));

    session.select("owner_sex", Vec::<String>::new());
    let out = session.run_pass(&[]);
    assert_eq!(out.kpi("Avg Dog Age"), Some("n/a"));
    assert_eq!(out.kpi("Peak Year"), Some("n/a (0)"));
}

#[test]
fn test_large_counts_are_grouped_in_chart_labels() {
    let csv = "StichtagDatJahr,HID,SexLang,SexHundLang,Rasse1Text,AnzHunde\n2020,1,w,w,Mops,12500\n";
    let mut session = Session::with_settings(Dogs::new(), swiss_settings());
    session.load_text(csv, "dogs.csv").unwrap();
    let out = session.run_pass(&[("breeds", SURFACE)]);
    let texts = out.chart("breeds").unwrap().commands.texts();
    assert_eq!(texts, ["Mops", "12'500"]);
    assert_eq!(out.kpi("Dogs (Visible)"), Some("12'500"));
}

#[test]
fn test_round_half_up_is_asymmetric() {
    assert_eq!(round_half_up(0.5), 1.0);
    assert_eq!(round_half_up(-0.5), 0.0);
    assert_eq!(round_half_up(2.4999), 2.0);
}

#[test]
fn test_truncate_counts_chars_not_bytes() {
    assert_eq!(truncate("Höngg-Rütihof-Süd", 10), "Höngg-Rüt...");
}
