//! Noise-tolerant extremum detection for evenly sampled 1D signals.
//!
//! The detector reduces the signal to the points where its direction of
//! travel changes, then walks those points as alternating peaks and valleys.
//! A peak is only confirmed once the signal has dropped at least `threshold`
//! below it, so oscillations smaller than the threshold neither create nor
//! displace peaks. Minima are found by running the same scan on the negated
//! signal.
//!
//! ## Plateaus
//!
//! When a maximum is flat, the first sample of the run is reported.

pub mod candidates;
pub mod polarity;
mod scanner;
pub mod signal;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use candidates::{extract_candidates, Candidate};
pub use polarity::Polarity;
pub use signal::{default_threshold, Signal};

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while validating extremum detection inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtremaError {
    /// Input is not a one-dimensional sequence
    #[error("Input must be a 1D sequence, got rank {rank}")]
    InvalidShape { rank: usize },

    /// Polarity is neither maxima nor minima
    #[error("Invalid extremum polarity: {0}")]
    InvalidPolarity(String),

    /// Input has no samples
    #[error("Input signal is empty")]
    EmptySignal,

    /// Input holds a NaN or infinite sample
    #[error("Non-finite sample at index {index}")]
    NonFiniteSample { index: usize },

    /// Threshold is negative or not finite
    #[error("Threshold must be a finite non-negative number, got {0}")]
    InvalidThreshold(f64),
}

// ============================================================================
// Results
// ============================================================================

/// A confirmed extremum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakRecord {
    /// Position in the input signal
    pub index: usize,
    /// Sample value at that position, in the caller's sign
    pub magnitude: f64,
}

impl PeakRecord {
    pub fn new(index: usize, magnitude: f64) -> Self {
        Self { index, magnitude }
    }
}

/// Outcome of one detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremaReport {
    /// Confirmed extrema, in increasing index order
    pub peaks: Vec<PeakRecord>,
    /// Threshold the scan actually used
    pub threshold: f64,
    pub polarity: Polarity,
    /// Number of direction-change candidates, endpoints included
    pub candidate_count: usize,
    /// True when the input was monotone or flat and the scan was skipped
    pub degenerate: bool,
}

impl ExtremaReport {
    /// No extremum cleared the threshold
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.peaks.iter().map(|p| p.index).collect()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.peaks.iter().map(|p| p.magnitude).collect()
    }
}

// ============================================================================
// Detector
// ============================================================================

/// Configurable extremum detector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakFinder {
    /// Minimum drop (or rise, for minima) that confirms an extremum.
    /// `None` means a quarter of the signal's peak-to-peak range.
    pub threshold: Option<f64>,
    pub polarity: Polarity,
}

impl PeakFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Run detection over `signal`.
    ///
    /// Fails only on invalid input; a signal with no significant extremum
    /// yields an empty report.
    pub fn find(&self, signal: &Signal) -> Result<ExtremaReport, ExtremaError> {
        let samples = signal.samples_1d()?;

        let threshold = match self.threshold {
            Some(t) if !t.is_finite() || t < 0.0 => return Err(ExtremaError::InvalidThreshold(t)),
            Some(t) => t,
            None => default_threshold(samples),
        };

        let working = self.polarity.orient(samples);
        let candidates = extract_candidates(&working);
        tracing::debug!(
            "Scanning {} candidates from {} samples for {} (threshold {})",
            candidates.len(),
            samples.len(),
            self.polarity,
            threshold
        );

        let scan = scanner::scan(&candidates, threshold);
        if scan.peaks.is_empty() {
            tracing::info!("No significant peaks found");
        }

        Ok(ExtremaReport {
            peaks: self.polarity.restore(scan.peaks),
            threshold,
            polarity: self.polarity,
            candidate_count: candidates.len(),
            degenerate: scan.degenerate,
        })
    }
}

/// Find the significant extrema of `signal`.
///
/// `threshold` defaults to `(max - min) / 4`. Returned records are sorted by
/// index; magnitudes keep the sign of the input for both polarities.
pub fn find_extrema(
    signal: &Signal,
    threshold: Option<f64>,
    polarity: Polarity,
) -> Result<Vec<PeakRecord>, ExtremaError> {
    let finder = PeakFinder {
        threshold,
        polarity,
    };
    finder.find(signal).map(|report| report.peaks)
}
