//! Tests for blink event detection
//!
//! Tests cover:
//! - Polarity election on negative and positive going blinks
//! - Outlier rejection of oversized deflections
//! - Start-time cutoff and first-sample offset
//! - Running through the analyzer registry

use peakscan::analysis::{
    AnalysisError, AnalysisOutput, AnalyzerRegistry, BlinkConfig, BlinkDetector,
};
use peakscan::recording::Recording;

use crate::common::synthetic::{blink_trace, negate};

const SFREQ: f64 = 100.0;
const FIRST_SAMP: i64 = 1000;

/// Five downward blinks, the one at 700 far larger than the rest
fn downward_blinks() -> Vec<f64> {
    blink_trace(
        1000,
        &[
            (100, -300e-6),
            (300, -280e-6),
            (500, -320e-6),
            (700, -2000e-6),
            (900, -310e-6),
        ],
    )
}

fn recording(samples: Vec<f64>) -> Recording {
    Recording::new(SFREQ, FIRST_SAMP)
        .with_channel("Fp1", vec![0.0; samples.len()])
        .with_channel("A1", samples)
}

#[test]
fn test_downward_blinks_elect_minima() {
    let events = BlinkDetector::default()
        .detect(&recording(downward_blinks()))
        .unwrap();

    assert_eq!(events.samples(), vec![1100, 1300, 1500, 1900]);
    for row in events.rows() {
        assert_eq!(row[1], 0);
        assert_eq!(row[2], 998);
    }
}

#[test]
fn test_upward_blinks_elect_maxima() {
    let events = BlinkDetector::default()
        .detect(&recording(negate(&downward_blinks())))
        .unwrap();
    assert_eq!(events.samples(), vec![1100, 1300, 1500, 1900]);
}

#[test]
fn test_tstart_drops_early_events() {
    let config = BlinkConfig {
        tstart: 2.0,
        event_id: 5,
        ..BlinkConfig::default()
    };
    let events = BlinkDetector::new(config)
        .detect(&recording(downward_blinks()))
        .unwrap();

    assert_eq!(events.rows(), vec![[1300, 0, 5], [1500, 0, 5], [1900, 0, 5]]);
}

#[test]
fn test_tstart_cutoff_is_exclusive() {
    // An event exactly at the cutoff sample is dropped
    let config = BlinkConfig {
        tstart: 3.0,
        ..BlinkConfig::default()
    };
    let events = BlinkDetector::new(config)
        .detect(&recording(downward_blinks()))
        .unwrap();
    assert_eq!(events.samples(), vec![1500, 1900]);
}

#[test]
fn test_negative_tstart_keeps_first_sample() {
    let samples = vec![5e-4, 0.0, 0.0, 5e-4, 0.0, 0.0, 5e-4, 0.0];
    let rec = Recording::new(SFREQ, 0).with_channel("A1", samples);
    let config = BlinkConfig {
        tstart: -1.0,
        ..BlinkConfig::default()
    };
    let events = BlinkDetector::new(config).detect(&rec).unwrap();
    assert_eq!(events.samples(), vec![0, 3, 6]);

    // At zero the cutoff excludes sample 0 again
    let events = BlinkDetector::default().detect(&rec).unwrap();
    assert_eq!(events.samples(), vec![3, 6]);
}

#[test]
fn test_sub_threshold_trace_has_no_events() {
    let quiet = blink_trace(400, &[(100, -50e-6), (300, -60e-6)]);
    let events = BlinkDetector::default().detect(&recording(quiet)).unwrap();
    assert!(events.is_empty());
}

#[test]
fn test_missing_channel_is_reported() {
    let rec = Recording::new(SFREQ, 0).with_channel("Fp1", downward_blinks());
    let err = BlinkDetector::default().detect(&rec).unwrap_err();
    assert!(matches!(err, AnalysisError::MissingChannel(msg) if msg.contains("A1")));
}

#[test]
fn test_through_registry() {
    let registry = AnalyzerRegistry::new();
    let rec = recording(downward_blinks());

    let available = registry.available_for(&rec);
    assert!(available.iter().any(|a| a.id() == "blink_events"));

    let detector = registry.find_by_id("blink_events").unwrap();
    let result = detector.analyze(&rec).unwrap();
    match &result.output {
        AnalysisOutput::Events(events) => assert_eq!(events.len(), 4),
        other => panic!("expected events, got {:?}", other),
    }
    assert!(!result.has_warnings());
}

#[test]
fn test_registry_config_update() {
    let mut registry = AnalyzerRegistry::new();
    let detector = registry.find_by_id_mut("blink_events").unwrap();
    let mut config = detector.get_config();
    config.parameters.insert("tstart".to_string(), "2.0".to_string());
    detector.set_config(&config);

    let result = registry
        .find_by_id("blink_events")
        .unwrap()
        .analyze(&recording(downward_blinks()))
        .unwrap();
    match result.output {
        AnalysisOutput::Events(events) => assert_eq!(events.samples(), vec![1300, 1500, 1900]),
        other => panic!("expected events, got {:?}", other),
    }
}
