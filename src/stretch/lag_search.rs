//! Search for the synthesis lag that best aligns a frame with the output.

use crate::core::types::Sample;
use crate::core::window::{window, Lag};
use crate::stretch::correlation::normalized_cross_correlation;
use crate::stretch::intervals::FrameGeometry;

/// Score given to "no candidate yet"; any real candidate above it wins.
const NO_CANDIDATE_SCORE: f64 = -1.0;

/// Result of a lag search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagChoice {
    /// Winning lag km.
    pub lag: Lag,
    /// Overlap length the winning lag was scored with.
    pub overlap: usize,
    /// Correlation score of the winning lag (-1.0 if no candidate beat the sentinel).
    pub score: f64,
    /// Number of lags that were scored.
    pub candidates: usize,
}

/// Finds the lag in `[-N/2, N/2]` that maximizes the correlation between the
/// analysis frame of `geometry` and the already synthesized output.
///
/// `synthesized` must be exactly the valid prefix of the output signal; the
/// search never reads past it. The overlap length starts at N (truncated at
/// the end of `synthesized`) and shrinks by one per lag step; the scan stops
/// once it drops below N/8, because very short overlaps correlate
/// spuriously well. Ties keep the earliest lag.
pub fn find_lag(geometry: &FrameGeometry, input: &[Sample], synthesized: &[Sample]) -> LagChoice {
    let nominal = geometry.nominal_start();
    let max_lag = geometry.max_lag();
    let first = if nominal >= max_lag {
        max_lag
    } else {
        geometry.intervals.synthesis
    };

    let mut lag = Lag::new(-(first as isize));
    let last = Lag::new(max_lag as isize);
    let analysis = geometry.analysis_start();
    let min_overlap = geometry.min_overlap();

    let mut overlap = lag
        .apply(nominal)
        .map_or(0, |pos| geometry.overlap_at(pos, synthesized.len()));

    let mut best = LagChoice {
        lag: Lag::ZERO,
        overlap: geometry.overlap_at(nominal, synthesized.len()),
        score: NO_CANDIDATE_SCORE,
        candidates: 0,
    };

    while lag <= last {
        if overlap < min_overlap {
            break;
        }

        let score = lag.apply(nominal).and_then(|pos| {
            let reference = window(input, analysis, overlap)?;
            let output = window(synthesized, pos, overlap)?;
            Some(normalized_cross_correlation(reference, output))
        });

        if let Some(score) = score {
            best.candidates += 1;
            if score > best.score {
                best.lag = lag;
                best.overlap = overlap;
                best.score = score;
            }
        }

        lag = lag.next();
        overlap -= 1;
    }

    best
}
