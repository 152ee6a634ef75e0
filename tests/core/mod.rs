//! Core module tests
//!
//! Tests for:
//! - Extremum detection semantics and edge cases
//! - Blink event detection over recordings
//! - Settings persistence

pub mod blink_tests;
pub mod settings_tests;
