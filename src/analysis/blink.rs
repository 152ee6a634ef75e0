//! Blink event detection from an ocular channel.
//!
//! Blinks show up as large deflections of one consistent sign. The detector
//! scans the channel for both maxima and minima, keeps whichever polarity has
//! the larger typical magnitude, discards deflections that are far smaller or
//! far larger than typical, and reports the survivors as event rows.
//!
//! Band-pass filtering happens before this stage. A `ChannelFilter` can be
//! plugged in to do it; the default passes samples through unchanged.

use super::*;
use crate::extrema::{find_extrema, Polarity, Signal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default event code for blink events
pub const DEFAULT_EVENT_ID: i64 = 998;

/// Default detection threshold, in volts
pub const DEFAULT_THRESHOLD: f64 = 100e-6;

// ============================================================================
// Configuration
// ============================================================================

/// Blink detector parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlinkConfig {
    /// Code written into the third column of every event row
    #[serde(default = "default_event_id")]
    pub event_id: i64,
    /// Minimum deflection that counts as an extremum
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Channels to read; exactly one must be present
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
    /// Ignore events at or before this many seconds into the recording
    #[serde(default)]
    pub tstart: f64,
}

fn default_event_id() -> i64 {
    DEFAULT_EVENT_ID
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_channels() -> Vec<String> {
    vec!["A1".to_string()]
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            event_id: DEFAULT_EVENT_ID,
            threshold: DEFAULT_THRESHOLD,
            channels: default_channels(),
            tstart: 0.0,
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// One detected event, as a `(sample, previous value, event id)` row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkEvent {
    /// Absolute sample number
    pub sample: i64,
    /// Always zero
    pub previous: i64,
    pub event_id: i64,
}

impl BlinkEvent {
    pub fn as_row(&self) -> [i64; 3] {
        [self.sample, self.previous, self.event_id]
    }
}

/// Ordered set of event rows
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTable {
    pub events: Vec<BlinkEvent>,
}

impl EventTable {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlinkEvent> {
        self.events.iter()
    }

    /// Rows as plain integer triples
    pub fn rows(&self) -> Vec<[i64; 3]> {
        self.events.iter().map(BlinkEvent::as_row).collect()
    }

    pub fn samples(&self) -> Vec<i64> {
        self.events.iter().map(|e| e.sample).collect()
    }
}

// ============================================================================
// Filtering seam
// ============================================================================

/// Conditioning applied to a channel before extremum detection
pub trait ChannelFilter: Send + Sync {
    fn apply(&self, samples: &[f64], sfreq: f64) -> Vec<f64>;
}

/// Leaves samples untouched
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl ChannelFilter for Passthrough {
    fn apply(&self, samples: &[f64], _sfreq: f64) -> Vec<f64> {
        samples.to_vec()
    }
}

// ============================================================================
// Polarity election and outlier rejection
// ============================================================================

/// Median of `values`; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    #[allow(clippy::manual_is_multiple_of)]
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    Some(median)
}

/// Median absolute magnitude of a set of peaks
pub fn nominal_magnitude(peaks: &[PeakRecord]) -> Option<f64> {
    let magnitudes: Vec<f64> = peaks.iter().map(|p| p.magnitude.abs()).collect();
    median(&magnitudes)
}

/// The polarity chosen to represent blinks
#[derive(Clone, Debug, PartialEq)]
pub struct Election {
    pub polarity: Polarity,
    pub peaks: Vec<PeakRecord>,
    /// Median absolute magnitude of `peaks`; `None` when there are none
    pub nominal: Option<f64>,
}

impl Election {
    /// The polarity that lost the election
    pub fn rejected(&self) -> Polarity {
        self.polarity.flipped()
    }
}

/// Keep the polarity with the larger typical deflection.
///
/// Minima win only when strictly larger. A polarity with no peaks never wins
/// over one that has some.
pub fn elect_polarity(maxima: Vec<PeakRecord>, minima: Vec<PeakRecord>) -> Election {
    let nominal_max = nominal_magnitude(&maxima);
    let nominal_min = nominal_magnitude(&minima);

    let minima_wins = match (nominal_max, nominal_min) {
        (Some(max), Some(min)) => min > max,
        (None, Some(_)) => true,
        _ => false,
    };

    if minima_wins {
        Election {
            polarity: Polarity::Minima,
            peaks: minima,
            nominal: nominal_min,
        }
    } else {
        Election {
            polarity: Polarity::Maxima,
            peaks: maxima,
            nominal: nominal_max,
        }
    }
}

/// Drop peaks whose absolute magnitude is not strictly between half and
/// twice `nominal`.
pub fn reject_outliers(peaks: Vec<PeakRecord>, nominal: f64) -> Vec<PeakRecord> {
    peaks
        .into_iter()
        .filter(|p| {
            let size = p.magnitude.abs();
            size < 2.0 * nominal && size > 0.5 * nominal
        })
        .collect()
}

// ============================================================================
// Detector
// ============================================================================

/// Blink event detector
#[derive(Clone)]
pub struct BlinkDetector {
    pub config: BlinkConfig,
    pub filter: Arc<dyn ChannelFilter>,
}

impl Default for BlinkDetector {
    fn default() -> Self {
        Self::new(BlinkConfig::default())
    }
}

impl fmt::Debug for BlinkDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlinkDetector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BlinkDetector {
    pub fn new(config: BlinkConfig) -> Self {
        Self {
            config,
            filter: Arc::new(Passthrough),
        }
    }

    pub fn with_filter(mut self, filter: impl ChannelFilter + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    /// Detect blink events in `recording`.
    ///
    /// Returned samples are absolute (offset by the recording's first
    /// sample) and sorted.
    pub fn detect(&self, recording: &Recording) -> Result<EventTable, AnalysisError> {
        if !recording.sfreq.is_finite() || recording.sfreq <= 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "Sampling rate must be positive, got {}",
                recording.sfreq
            )));
        }

        let picks = recording.pick_channels(&self.config.channels);
        if picks.is_empty() {
            return Err(AnalysisError::MissingChannel(format!(
                "{:?} not in channel list",
                self.config.channels
            )));
        }
        tracing::info!("Detecting blinks from channel {:?}", self.config.channels);

        let rows: Vec<Vec<f64>> = picks
            .iter()
            .map(|&i| {
                self.filter
                    .apply(&recording.channels[i].samples, recording.sfreq)
            })
            .collect();
        let signal = Signal::from_rows(rows).squeeze();

        let threshold = Some(self.config.threshold);
        let (maxima, minima) = rayon::join(
            || find_extrema(&signal, threshold, Polarity::Maxima),
            || find_extrema(&signal, threshold, Polarity::Minima),
        );

        let election = elect_polarity(maxima?, minima?);
        tracing::debug!(
            "Elected {} over {} with nominal magnitude {:?}",
            election.polarity,
            election.rejected(),
            election.nominal
        );

        let kept = match election.nominal {
            Some(nominal) => reject_outliers(election.peaks, nominal),
            None => Vec::new(),
        };

        let start = recording.time_as_index(self.config.tstart);
        let events: Vec<BlinkEvent> = kept
            .iter()
            .filter(|p| p.index as i64 > start)
            .map(|p| BlinkEvent {
                sample: p.index as i64 + recording.first_samp,
                previous: 0,
                event_id: self.config.event_id,
            })
            .collect();

        tracing::info!("Number of EOG events detected : {}", events.len());
        Ok(EventTable { events })
    }
}

impl Analyzer for BlinkDetector {
    fn id(&self) -> &str {
        "blink_events"
    }

    fn name(&self) -> &str {
        "Blink Detector"
    }

    fn description(&self) -> &str {
        "Finds blink deflections on an ocular channel. Picks the dominant \
         polarity, drops atypically small or large deflections, and emits \
         event rows."
    }

    fn category(&self) -> &str {
        "Events"
    }

    fn required_channels(&self) -> Vec<&str> {
        self.config.channels.iter().map(String::as_str).collect()
    }

    fn analyze(&self, recording: &Recording) -> Result<AnalysisResult, AnalysisError> {
        let (events, computation_time) = timed_analyze(|| self.detect(recording));
        let events = events?;

        let mut warnings = vec![];
        if events.is_empty() {
            warnings.push("No blink events detected".to_string());
        }

        Ok(AnalysisResult::new(
            format!("Blinks ({})", self.config.channels.join(", ")),
            AnalysisOutput::Events(events),
        )
        .with_metadata(AnalysisMetadata {
            algorithm: "Polarity-elected extremum detection".to_string(),
            parameters: vec![
                ("channels".to_string(), self.config.channels.join(",")),
                ("threshold".to_string(), format!("{:e}", self.config.threshold)),
                ("event_id".to_string(), self.config.event_id.to_string()),
                ("tstart".to_string(), format!("{:.3}", self.config.tstart)),
            ],
            warnings,
            computation_time_ms: computation_time,
        }))
    }

    fn get_config(&self) -> AnalyzerConfig {
        let mut params = HashMap::new();
        params.insert("channels".to_string(), self.config.channels.join(","));
        params.insert("threshold".to_string(), self.config.threshold.to_string());
        params.insert("event_id".to_string(), self.config.event_id.to_string());
        params.insert("tstart".to_string(), self.config.tstart.to_string());

        AnalyzerConfig {
            id: self.id().to_string(),
            name: self.name().to_string(),
            parameters: params,
        }
    }

    fn set_config(&mut self, config: &AnalyzerConfig) {
        if let Some(chs) = config.parameters.get("channels") {
            let channels: Vec<String> = chs
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if !channels.is_empty() {
                self.config.channels = channels;
            }
        }
        if let Some(t) = config.parameters.get("threshold") {
            if let Ok(threshold) = t.parse() {
                self.config.threshold = threshold;
            }
        }
        if let Some(id) = config.parameters.get("event_id") {
            if let Ok(event_id) = id.parse() {
                self.config.event_id = event_id;
            }
        }
        if let Some(t) = config.parameters.get("tstart") {
            if let Ok(tstart) = t.parse() {
                self.config.tstart = tstart;
            }
        }
    }

    fn clone_box(&self) -> Box<dyn Analyzer> {
        Box::new(self.clone())
    }
}
