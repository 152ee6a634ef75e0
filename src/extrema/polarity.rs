//! Extremum direction and the sign flip that maps minima onto maxima.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};

use super::{ExtremaError, PeakRecord};

/// Which kind of extremum to look for
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Polarity {
    /// Local maxima (peaks)
    #[default]
    #[strum(to_string = "maxima", serialize = "max")]
    Maxima,
    /// Local minima (valleys)
    #[strum(to_string = "minima", serialize = "min")]
    Minima,
}

impl Polarity {
    /// Parse a polarity name, reporting unknown names as `InvalidPolarity`
    pub fn parse(name: &str) -> Result<Self, ExtremaError> {
        Self::from_str(name.trim()).map_err(|_| ExtremaError::InvalidPolarity(name.to_string()))
    }

    /// Integer code used by callers that speak `1` / `-1`
    pub fn code(self) -> i32 {
        match self {
            Polarity::Maxima => 1,
            Polarity::Minima => -1,
        }
    }

    /// The opposite polarity
    pub fn flipped(self) -> Self {
        match self {
            Polarity::Maxima => Polarity::Minima,
            Polarity::Minima => Polarity::Maxima,
        }
    }

    /// Produce the working signal the maxima scanner runs on.
    pub(crate) fn orient(self, samples: &[f64]) -> Vec<f64> {
        match self {
            Polarity::Maxima => samples.to_vec(),
            Polarity::Minima => samples.iter().map(|v| -v).collect(),
        }
    }

    /// Map peaks found on the working signal back to the caller's sign.
    /// Indices are untouched.
    pub(crate) fn restore(self, mut peaks: Vec<PeakRecord>) -> Vec<PeakRecord> {
        if self == Polarity::Minima {
            for peak in &mut peaks {
                peak.magnitude = -peak.magnitude;
            }
        }
        peaks
    }
}

impl TryFrom<i32> for Polarity {
    type Error = ExtremaError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Polarity::Maxima),
            -1 => Ok(Polarity::Minima),
            other => Err(ExtremaError::InvalidPolarity(other.to_string())),
        }
    }
}
