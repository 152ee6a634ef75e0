//! Shape-carrying sample buffer fed to the extrema scanner.

use super::ExtremaError;

/// An ordered buffer of real samples together with its logical shape.
///
/// Most callers build a rank-1 signal straight from a slice or vector. Picking
/// several channels out of a recording produces a rank-2 signal, which the
/// scanner rejects.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    shape: Vec<usize>,
    samples: Vec<f64>,
}

impl Signal {
    /// Create a rank-1 signal
    pub fn new(samples: Vec<f64>) -> Self {
        Self {
            shape: vec![samples.len()],
            samples,
        }
    }

    /// Create a rank-2 signal from row-major data (one row per channel).
    ///
    /// The column count is taken from the first row; rows are flattened as-is.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let shape = vec![rows.len(), cols];
        let samples = rows.into_iter().flatten().collect();
        Self { shape, samples }
    }

    /// Create a rank-0 (scalar) signal
    pub fn scalar(value: f64) -> Self {
        Self {
            shape: vec![],
            samples: vec![value],
        }
    }

    /// Drop every axis of length one.
    ///
    /// A single picked channel `[1, n]` collapses to `[n]`; a lone sample
    /// collapses to a scalar.
    pub fn squeeze(mut self) -> Self {
        self.shape.retain(|&dim| dim != 1);
        self
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of samples across all axes
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Flat view of the samples, regardless of shape
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Borrow the samples as a validated 1D sequence.
    ///
    /// Fails for any rank other than one, for an empty sequence, and for
    /// NaN or infinite samples.
    pub fn samples_1d(&self) -> Result<&[f64], ExtremaError> {
        if self.rank() != 1 {
            return Err(ExtremaError::InvalidShape { rank: self.rank() });
        }
        if self.samples.is_empty() {
            return Err(ExtremaError::EmptySignal);
        }
        if let Some(index) = self.samples.iter().position(|v| !v.is_finite()) {
            return Err(ExtremaError::NonFiniteSample { index });
        }
        Ok(&self.samples)
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}

impl From<&[f64]> for Signal {
    fn from(samples: &[f64]) -> Self {
        Self::new(samples.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Signal {
    fn from(samples: [f64; N]) -> Self {
        Self::new(samples.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for Signal {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::from_rows(rows)
    }
}

/// Smallest and largest sample. `data` must be non-empty.
pub(crate) fn bounds(data: &[f64]) -> (f64, f64) {
    data.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Threshold used when the caller does not supply one: a quarter of the
/// peak-to-peak range.
pub fn default_threshold(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let (lo, hi) = bounds(data);
    (hi - lo) / 4.0
}
