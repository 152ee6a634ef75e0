//! Alternating peak/valley scan over the candidate points.
//!
//! The candidates alternate between rises and falls, except possibly for the
//! first point, which is always included whether or not it turns. The scan
//! walks them in peak/valley pairs, holding the best unconfirmed peak until a
//! later valley sits at least `threshold` below it.

use std::cmp::Ordering;

use super::candidates::Candidate;
use super::PeakRecord;

/// Peaks found over a candidate set, on the working (maxima) signal
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Scan {
    pub peaks: Vec<PeakRecord>,
    /// True when the candidate set was too small to alternate
    pub degenerate: bool,
}

/// Role of the first candidate once the left boundary has been sorted out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lead {
    /// The first candidate is visited as a peak
    Peak,
    /// The first candidate is a valley that needs no visit
    Valley,
}

pub(crate) fn scan(candidates: &[Candidate], threshold: f64) -> Scan {
    let floor = candidates
        .iter()
        .map(|c| c.value)
        .fold(f64::INFINITY, f64::min);

    if candidates.len() <= 2 {
        return Scan {
            peaks: resolve_degenerate(candidates, floor, threshold)
                .into_iter()
                .collect(),
            degenerate: true,
        };
    }

    let (working, lead) = bootstrap(candidates);
    let mut scanner = Scanner::new(floor, threshold);
    let last = scanner.run(&working, lead);

    Scan {
        peaks: scanner.finish(last),
        degenerate: false,
    }
}

/// A monotone or flat input: its highest candidate is the only possible
/// peak, and only when it clears the threshold over the floor.
fn resolve_degenerate(candidates: &[Candidate], floor: f64, threshold: f64) -> Option<PeakRecord> {
    let top = candidates
        .iter()
        .copied()
        .reduce(|best, c| if c.value > best.value { c } else { best })?;

    (top.value > floor + threshold).then(|| PeakRecord::new(top.index, top.value))
}

fn trend(from: &Candidate, to: &Candidate) -> Ordering {
    to.value.partial_cmp(&from.value).unwrap_or(Ordering::Equal)
}

/// Decide how the first point enters the alternation.
///
/// If the first two transitions move the same way, the point between them is
/// not a turn and is dropped: the second point when the signal opens
/// non-ascending (the first point stays the higher peak candidate), the first
/// point when it opens ascending.
fn bootstrap(candidates: &[Candidate]) -> (Vec<Candidate>, Lead) {
    let opening = trend(&candidates[0], &candidates[1]);
    let follow = trend(&candidates[1], &candidates[2]);
    let mut working = candidates.to_vec();

    match (opening == Ordering::Greater, opening == follow) {
        (false, false) => (working, Lead::Peak),
        (false, true) => {
            working.remove(1);
            (working, Lead::Peak)
        }
        (true, false) => (working, Lead::Valley),
        (true, true) => {
            working.remove(0);
            (working, Lead::Valley)
        }
    }
}

struct Scanner {
    floor: f64,
    threshold: f64,
    /// Lowest valley since the last confirmed peak
    left_min: f64,
    /// Best peak not yet confirmed by a deep enough valley
    pending: Option<Candidate>,
    found_peak: bool,
    peaks: Vec<PeakRecord>,
}

impl Scanner {
    fn new(floor: f64, threshold: f64) -> Self {
        Self {
            floor,
            threshold,
            left_min: floor,
            pending: None,
            found_peak: false,
            peaks: Vec::new(),
        }
    }

    fn pending_magnitude(&self) -> f64 {
        self.pending.map_or(self.floor, |c| c.value)
    }

    /// Walk peak/valley pairs and return the terminal candidate.
    fn run(&mut self, candidates: &[Candidate], lead: Lead) -> Candidate {
        let last = candidates.len() - 1;
        let mut i = match lead {
            Lead::Peak => 0,
            Lead::Valley => 1,
        };

        while i <= last {
            self.reopen_if_superseded(&candidates[i]);
            if i == last {
                break;
            }
            self.offer_peak(candidates[i]);
            self.visit_valley(&candidates[i + 1]);
            i += 2;
        }

        candidates[last]
    }

    /// A taller peak, or a valley that fell far enough below the last
    /// confirmed peak, starts a fresh search.
    fn reopen_if_superseded(&mut self, candidate: &Candidate) {
        if !self.found_peak {
            return;
        }
        let Some(last_peak) = self.peaks.last().map(|p| p.magnitude) else {
            return;
        };
        if candidate.value > last_peak || self.left_min < last_peak - self.threshold {
            self.pending = None;
            self.found_peak = false;
        }
    }

    fn offer_peak(&mut self, candidate: Candidate) {
        if candidate.value > self.pending_magnitude()
            && candidate.value > self.left_min + self.threshold
        {
            self.pending = Some(candidate);
        }
    }

    fn visit_valley(&mut self, candidate: &Candidate) {
        if !self.found_peak && self.pending_magnitude() > self.threshold + candidate.value {
            if let Some(peak) = self.pending {
                self.peaks.push(PeakRecord::new(peak.index, peak.value));
                self.found_peak = true;
                self.left_min = candidate.value;
                return;
            }
        }
        if candidate.value < self.left_min {
            self.left_min = candidate.value;
        }
    }

    /// Settle the right boundary: the last point may itself be a peak, or an
    /// unconfirmed pending peak is still the best one seen.
    fn finish(mut self, last: Candidate) -> Vec<PeakRecord> {
        if last.value > self.pending_magnitude() && last.value > self.left_min + self.threshold {
            self.peaks.push(PeakRecord::new(last.index, last.value));
        } else if !self.found_peak {
            if let Some(peak) = self.pending {
                self.peaks.push(PeakRecord::new(peak.index, peak.value));
            }
        }
        self.peaks
    }
}
