//! Analysis module for running detectors over recordings.
//!
//! Each detector implements the `Analyzer` trait, which gives a uniform way
//! to:
//! - Discover which detectors apply to a recording's channels
//! - Read and write parameters as string key/value pairs
//! - Return results with metadata about how they were produced

pub mod blink;
pub mod extrema;

use crate::extrema::{ExtremaError, PeakRecord};
use crate::recording::Recording;
use std::collections::HashMap;
use std::time::Instant;
use thiserror::Error;

pub use blink::{BlinkConfig, BlinkDetector, BlinkEvent, ChannelFilter, EventTable, Passthrough};
pub use extrema::ExtremaAnalyzer;

/// Errors that can occur during analysis
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A required channel is missing from the recording
    #[error("Missing required channel: {0}")]
    MissingChannel(String),

    /// Not enough data points for the analysis
    #[error("Insufficient data: need {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter configuration
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The extremum detector rejected its input
    #[error(transparent)]
    Extrema(#[from] ExtremaError),
}

/// Metadata about analysis results
#[derive(Clone, Debug, Default)]
pub struct AnalysisMetadata {
    /// Name of the algorithm used
    pub algorithm: String,
    /// Key parameters and their values
    pub parameters: Vec<(String, String)>,
    /// Warning messages about the analysis
    pub warnings: Vec<String>,
    /// Time taken for computation in milliseconds
    pub computation_time_ms: u64,
}

/// What an analyzer produced
#[derive(Clone, Debug, PartialEq)]
pub enum AnalysisOutput {
    /// Extrema of a single channel
    Peaks(Vec<PeakRecord>),
    /// Event rows in absolute sample numbers
    Events(EventTable),
}

/// Result of an analysis operation
#[derive(Clone, Debug)]
pub struct AnalysisResult {
    /// Display name for the result
    pub name: String,
    pub output: AnalysisOutput,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    pub fn new(name: impl Into<String>, output: AnalysisOutput) -> Self {
        Self {
            name: name.into(),
            output,
            metadata: AnalysisMetadata::default(),
        }
    }

    /// Add metadata to the result
    pub fn with_metadata(mut self, metadata: AnalysisMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Check if the analysis produced any warnings
    pub fn has_warnings(&self) -> bool {
        !self.metadata.warnings.is_empty()
    }
}

/// Configuration for an analyzer that can be serialized
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalyzerConfig {
    /// Unique identifier for the analyzer
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Parameter values as key-value pairs
    pub parameters: HashMap<String, String>,
}

/// Core trait for all detectors
pub trait Analyzer: Send + Sync {
    /// Unique identifier for this analyzer
    fn id(&self) -> &str;

    /// Human-readable algorithm name
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Category for grouping (e.g., "Extrema", "Events")
    fn category(&self) -> &str;

    /// Channel names the analyzer reads
    fn required_channels(&self) -> Vec<&str>;

    /// Execute analysis on a recording
    fn analyze(&self, recording: &Recording) -> Result<AnalysisResult, AnalysisError>;

    /// Get current configuration
    fn get_config(&self) -> AnalyzerConfig;

    /// Apply configuration
    fn set_config(&mut self, config: &AnalyzerConfig);

    /// Clone into a boxed trait object
    fn clone_box(&self) -> Box<dyn Analyzer>;
}

impl Clone for Box<dyn Analyzer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Registry of available analyzers
#[derive(Default)]
pub struct AnalyzerRegistry {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    /// Create a new registry with default analyzers
    pub fn new() -> Self {
        let mut registry = Self {
            analyzers: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Box::new(ExtremaAnalyzer::default()));
        self.register(Box::new(BlinkDetector::default()));
    }

    /// Register a new analyzer
    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.push(analyzer);
    }

    /// Get all registered analyzers
    pub fn all(&self) -> &[Box<dyn Analyzer>] {
        &self.analyzers
    }

    /// Analyzers whose required channels are all present in `recording`
    pub fn available_for(&self, recording: &Recording) -> Vec<&dyn Analyzer> {
        self.analyzers
            .iter()
            .filter(|a| {
                a.required_channels()
                    .iter()
                    .all(|ch| recording.has_channel(ch))
            })
            .map(|a| a.as_ref())
            .collect()
    }

    /// Get analyzers by category
    pub fn by_category(&self) -> HashMap<String, Vec<&dyn Analyzer>> {
        let mut categories: HashMap<String, Vec<&dyn Analyzer>> = HashMap::new();

        for analyzer in &self.analyzers {
            categories
                .entry(analyzer.category().to_string())
                .or_default()
                .push(analyzer.as_ref());
        }

        categories
    }

    /// Find an analyzer by ID
    pub fn find_by_id(&self, id: &str) -> Option<&dyn Analyzer> {
        self.analyzers
            .iter()
            .find(|a| a.id() == id)
            .map(|a| a.as_ref())
    }

    /// Find an analyzer by ID and return a mutable reference
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Box<dyn Analyzer>> {
        self.analyzers.iter_mut().find(|a| a.id() == id)
    }
}

/// Helper function to measure analysis execution time
pub fn timed_analyze<F, T>(f: F) -> (T, u64)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed().as_millis() as u64;
    (result, elapsed)
}

/// Helper to get a required channel or return an error
pub fn require_channel<'a>(recording: &'a Recording, name: &str) -> Result<&'a [f64], AnalysisError> {
    recording
        .channel(name)
        .ok_or_else(|| AnalysisError::MissingChannel(name.to_string()))
}

/// Helper to check minimum data length
pub fn require_min_length(data: &[f64], min_len: usize) -> Result<(), AnalysisError> {
    if data.len() < min_len {
        Err(AnalysisError::InsufficientData {
            needed: min_len,
            got: data.len(),
        })
    } else {
        Ok(())
    }
}
