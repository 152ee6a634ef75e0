//! peakscan - Noise tolerant extremum detection for sampled signals
//!
//! This library finds significant peaks and valleys in evenly sampled 1D
//! data, and builds blink event detection for ocular recordings on top of it.
//!
//! ## Module Structure
//!
//! - [`extrema`] - Core peak/valley detector
//! - [`recording`] - Multichannel recording container
//! - [`analysis`] - Analyzer framework and the blink event detector
//! - [`settings`] - Detector settings persistence

pub mod analysis;
pub mod extrema;
pub mod recording;
pub mod settings;

pub use extrema::{find_extrema, ExtremaError, ExtremaReport, PeakFinder, PeakRecord, Polarity, Signal};
