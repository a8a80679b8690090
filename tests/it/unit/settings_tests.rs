//! Unit tests for settings persistence.

use civicboard::Settings;
use civicboard::chart::Rgba;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_save_and_read_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = Settings::default();
    settings.format.placeholder = "n/a".to_string();
    settings.chart.text_color = Rgba::rgb(0x20, 0x20, 0x20);
    settings.save_to(&path).unwrap();

    let loaded = Settings::read_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("absent.json"));
    assert_eq!(settings, Settings::default());
    assert!(Settings::read_from(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_invalid_colour_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"chart": {"grid_color": "teal"}}"#).unwrap();
    assert!(Settings::read_from(&path).is_err());
    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_partial_file_overrides_named_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r##"{"chart": {"font_size": 14, "muted_color": "#abc"}}"##).unwrap();

    let settings = Settings::load_from(&path);
    assert_eq!(settings.chart.font_size, 14.0);
    assert_eq!(settings.chart.muted_color, Rgba::rgb(0xaa, 0xbb, 0xcc));
    assert_eq!(settings.format, Default::default());
}
