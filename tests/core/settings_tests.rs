//! Tests for detector settings persistence
//!
//! Tests cover:
//! - Save/load through an explicit path
//! - Defaults for missing fields
//! - Error reporting for unreadable files

use peakscan::extrema::Polarity;
use peakscan::settings::{DetectorSettings, SettingsError};

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = DetectorSettings::default();
    settings.polarity = Polarity::Minima;
    settings.threshold = Some(2.5);
    settings.blink.channels = vec!["EOG".to_string()];
    settings.blink.tstart = 1.25;

    settings.save_to(&path).unwrap();
    assert!(path.exists());

    let loaded = DetectorSettings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_saved_file_is_readable_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    DetectorSettings::default().save_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["polarity"], "maxima");
    assert_eq!(value["blink"]["event_id"], 998);
    assert!(value["threshold"].is_null());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DetectorSettings::load_from(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_unknown_polarity_is_parse_error() {
    let err = DetectorSettings::from_json(r#"{"polarity":"sideways"}"#).unwrap_err();
    assert!(matches!(err, SettingsError::Parse(_)));
}
