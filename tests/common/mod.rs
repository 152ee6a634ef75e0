//! Common test utilities shared across all test modules
//!
//! Synthetic signal generators, assertion helpers, and float comparison
//! helpers.

#![allow(dead_code)]

/// Test data generators for synthetic tests
pub mod synthetic {
    use std::f64::consts::PI;

    /// Deterministic bounded wiggle, standing in for measurement noise
    pub fn wiggle(i: usize, amplitude: f64) -> f64 {
        amplitude * (i as f64 * 1.7).sin()
    }

    /// `-amplitude * cos(2π f t)` sampled at `rate` Hz over `[0, duration]`,
    /// plus a small wiggle. Starts and ends in a trough when `f * duration`
    /// is whole.
    pub fn noisy_wave(amplitude: f64, freq: f64, duration: f64, rate: f64, noise: f64) -> Vec<f64> {
        let count = (duration * rate).round() as usize + 1;
        (0..count)
            .map(|i| {
                let t = i as f64 / rate;
                -amplitude * (2.0 * PI * freq * t).cos() + wiggle(i, noise)
            })
            .collect()
    }

    /// A flat trace with a Gaussian deflection of `amplitude` at each
    /// `(center, amplitude)` pair.
    pub fn blink_trace(len: usize, blinks: &[(usize, f64)]) -> Vec<f64> {
        (0..len)
            .map(|i| {
                blinks
                    .iter()
                    .map(|&(center, amplitude)| {
                        let z = (i as f64 - center as f64) / 5.0;
                        amplitude * (-z * z).exp()
                    })
                    .sum()
            })
            .collect()
    }

    pub fn negate(data: &[f64]) -> Vec<f64> {
        data.iter().map(|v| -v).collect()
    }
}

/// Assertion helpers for common test patterns
pub mod assertions {
    use peakscan::PeakRecord;

    /// Assert that peak indices are strictly increasing
    pub fn assert_strictly_increasing(peaks: &[PeakRecord]) {
        for (i, pair) in peaks.windows(2).enumerate() {
            assert!(
                pair[1].index > pair[0].index,
                "Peak {} at index {} should come after index {}",
                i + 1,
                pair[1].index,
                pair[0].index
            );
        }
    }

    /// Assert that every reported magnitude is the sample at its index
    pub fn assert_magnitudes_match(peaks: &[PeakRecord], data: &[f64]) {
        for peak in peaks {
            assert_eq!(
                peak.magnitude, data[peak.index],
                "Magnitude at index {} should equal the sample value",
                peak.index
            );
        }
    }
}

/// Float comparison helpers for testing
pub mod float_cmp {
    /// Check if two floats are approximately equal within a tolerance
    pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    /// Assert that two floats are approximately equal
    pub fn assert_approx_eq(a: f64, b: f64, tolerance: f64) {
        assert!(
            approx_eq(a, b, tolerance),
            "Values not approximately equal: {} vs {} (tolerance: {})",
            a,
            b,
            tolerance
        );
    }

    /// Default tolerance for float comparisons (0.0001)
    pub const DEFAULT_TOLERANCE: f64 = 0.0001;
}
