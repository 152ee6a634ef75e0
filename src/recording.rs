//! Multichannel recordings of evenly sampled data.

use serde::{Deserialize, Serialize};

/// A single named channel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub samples: Vec<f64>,
}

/// An evenly sampled, channel-major recording
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Sampling rate in Hz
    pub sfreq: f64,
    /// Absolute sample number of the first stored sample
    pub first_samp: i64,
    pub channels: Vec<Channel>,
}

impl Recording {
    pub fn new(sfreq: f64, first_samp: i64) -> Self {
        Self {
            sfreq,
            first_samp,
            channels: Vec::new(),
        }
    }

    /// Builder-style channel append
    pub fn with_channel(mut self, name: impl Into<String>, samples: Vec<f64>) -> Self {
        self.push_channel(name, samples);
        self
    }

    pub fn push_channel(&mut self, name: impl Into<String>, samples: Vec<f64>) {
        self.channels.push(Channel {
            name: name.into(),
            samples,
        });
    }

    pub fn channel_names(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.iter().any(|c| c.name == name)
    }

    /// Samples of the channel called `name`, if present
    pub fn channel(&self, name: &str) -> Option<&[f64]> {
        self.channels
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.samples.as_slice())
    }

    /// Indices of the channels whose names appear in `include`, in recording
    /// order. Names are matched exactly.
    pub fn pick_channels(&self, include: &[String]) -> Vec<usize> {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, c)| include.iter().any(|name| *name == c.name))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of samples per channel (taken from the first channel)
    pub fn n_times(&self) -> usize {
        self.channels.first().map_or(0, |c| c.samples.len())
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        if self.sfreq > 0.0 {
            self.n_times() as f64 / self.sfreq
        } else {
            0.0
        }
    }

    /// Sample index (relative to the first stored sample) at time `t`
    /// seconds, rounded down. Negative times give negative indices.
    pub fn time_as_index(&self, t: f64) -> i64 {
        let index = (t * self.sfreq).floor();
        if index.is_finite() {
            index as i64
        } else {
            0
        }
    }
}
