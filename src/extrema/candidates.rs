//! Reduction of a signal to its direction-change points.

/// A sample retained as a possible peak or valley
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position in the original signal
    pub index: usize,
    /// Sample value at that position
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Rising,
    Falling,
}

/// A flat step counts as falling. A plateau therefore ends a rise on its
/// first sample, which makes that sample the extremum.
fn direction(from: f64, to: f64) -> Direction {
    if to > from {
        Direction::Rising
    } else {
        Direction::Falling
    }
}

/// Collect the first sample, every sample where the direction of travel
/// changes, and the last sample, in increasing index order.
///
/// A single-sample signal yields one candidate; anything longer yields at
/// least the two endpoints.
pub fn extract_candidates(samples: &[f64]) -> Vec<Candidate> {
    let Some(&first) = samples.first() else {
        return Vec::new();
    };

    let mut candidates = vec![Candidate {
        index: 0,
        value: first,
    }];

    let directions: Vec<Direction> = samples
        .windows(2)
        .map(|pair| direction(pair[0], pair[1]))
        .collect();

    for (i, turn) in directions.windows(2).enumerate() {
        if turn[0] != turn[1] {
            candidates.push(Candidate {
                index: i + 1,
                value: samples[i + 1],
            });
        }
    }

    if samples.len() > 1 {
        let last = samples.len() - 1;
        candidates.push(Candidate {
            index: last,
            value: samples[last],
        });
    }

    candidates
}
