//! SOLA frame loop.

use crate::core::types::Sample;
use crate::core::window::{window, Lag};
use crate::error::SolaError;
use crate::stretch::blend::{blend_frame, OutputSignal};
use crate::stretch::intervals::{FrameGeometry, Intervals};
use crate::stretch::lag_search::find_lag;
use crate::stretch::params::SolaParams;

/// Synchronized overlap-add (SOLA) time-scale modification engine.
///
/// The engine is an immutable description of one configuration; every call
/// to [`SolaEngine::start`] builds its own output signal, so the same engine
/// (and the same input) can be used for any number of runs, from any thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolaEngine {
    alpha: f64,
    frame_size: usize,
    intervals: Intervals,
}

/// What happened to one frame of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    /// Frame index m (frame 0 is copied and has no record).
    pub index: usize,
    /// Lag the frame was placed with.
    pub lag: Lag,
    /// Correlation score of that lag.
    pub score: f64,
    /// Crossfade length used when blending the frame.
    pub overlap: usize,
    /// Valid output length after the frame.
    pub valid_len: usize,
}

/// Output of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolaOutput {
    /// Synthesized signal.
    pub samples: Vec<Sample>,
    /// One record per synthesized frame, in order.
    pub frames: Vec<FrameRecord>,
}

impl SolaEngine {
    /// Creates an engine for the given time-scale factor and frame size.
    ///
    /// Only structural soundness is checked here (N > 0, α positive and
    /// finite, a non-zero analysis interval). The user-facing ranges are
    /// enforced by [`SolaParams::validate`].
    ///
    /// # Errors
    /// Returns [`SolaError::InvalidConfiguration`] for unusable values.
    pub fn new(alpha: f64, frame_size: usize) -> Result<Self, SolaError> {
        if frame_size == 0 {
            return Err(SolaError::InvalidConfiguration(
                "frame size must be greater than zero".to_string(),
            ));
        }
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(SolaError::InvalidConfiguration(format!(
                "time-scale factor must be positive and finite, got {}",
                alpha
            )));
        }
        let intervals = Intervals::new(alpha, frame_size);
        if intervals.analysis == 0 {
            return Err(SolaError::InvalidConfiguration(format!(
                "frame size {} is too small for time-scale factor {}",
                frame_size, alpha
            )));
        }
        Ok(Self {
            alpha,
            frame_size,
            intervals,
        })
    }

    /// Creates an engine from user-facing parameters without range checks.
    pub fn from_params(params: &SolaParams) -> Result<Self, SolaError> {
        Self::new(params.alpha, params.frame_size)
    }

    /// Returns the time-scale factor.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the frame size in samples.
    #[inline]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Returns the analysis/synthesis intervals.
    #[inline]
    pub fn intervals(&self) -> Intervals {
        self.intervals
    }

    /// Output capacity for an input of `input_len` samples: `floor(len * α) + N`.
    pub fn capacity_for(&self, input_len: usize) -> usize {
        (input_len as f64 * self.alpha) as usize + self.frame_size
    }

    /// Number of frames after the first: `floor((len - N) / Sa)`.
    pub fn max_frames(&self, input_len: usize) -> usize {
        input_len.saturating_sub(self.frame_size) / self.intervals.analysis
    }

    /// Starts a run over `input`.
    ///
    /// # Errors
    /// - [`SolaError::InsufficientData`] if the input is shorter than one frame.
    ///   Nothing is allocated in that case.
    /// - [`SolaError::ResourceExhausted`] if the output cannot be allocated.
    pub fn start<'a>(&self, input: &'a [Sample]) -> Result<Synthesis<'a>, SolaError> {
        let first = window(input, 0, self.frame_size).ok_or(SolaError::InsufficientData {
            provided: input.len(),
            minimum: self.frame_size,
        })?;

        let capacity = self.capacity_for(input.len());
        let mut output = OutputSignal::allocate(capacity)?;
        output.seed(first)?;

        let max_frames = self.max_frames(input.len());
        log::debug!(
            "SOLA start: {} samples, alpha {}, N {}, Sa {}, Ss {}, {} frames, capacity {}",
            input.len(),
            self.alpha,
            self.frame_size,
            self.intervals.analysis,
            self.intervals.synthesis,
            max_frames,
            capacity
        );

        Ok(Synthesis {
            input,
            output,
            frame_size: self.frame_size,
            intervals: self.intervals,
            max_frames,
            phase: Phase::Initialized,
        })
    }

    /// Runs the whole frame loop, keeping one record per frame.
    pub fn run(&self, input: &[Sample]) -> Result<SolaOutput, SolaError> {
        let mut synthesis = self.start(input)?;
        let mut frames = Vec::with_capacity(synthesis.max_frames());
        for record in synthesis.by_ref() {
            frames.push(record?);
        }
        Ok(SolaOutput {
            samples: synthesis.finish(),
            frames,
        })
    }

    /// Time-scales `input`, returning only the synthesized signal.
    pub fn process(&self, input: &[Sample]) -> Result<Vec<Sample>, SolaError> {
        let mut synthesis = self.start(input)?;
        for record in synthesis.by_ref() {
            record?;
        }
        Ok(synthesis.finish())
    }
}

/// Position of a run in its frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Frame 0 has been copied; no other frame has been processed.
    Initialized,
    /// Frame `m` was the last one processed.
    Looping(usize),
    /// All frames have been processed (or a frame failed).
    Done,
}

/// An in-progress run: iterate it to process frames one by one.
///
/// Each item is the [`FrameRecord`] of one frame, or the error that stopped
/// the run. After the last frame (or an error) the iterator is exhausted and
/// [`Synthesis::finish`] hands back the synthesized signal.
#[derive(Debug)]
pub struct Synthesis<'a> {
    input: &'a [Sample],
    output: OutputSignal,
    frame_size: usize,
    intervals: Intervals,
    max_frames: usize,
    phase: Phase,
}

impl<'a> Synthesis<'a> {
    /// Current phase of the run.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of frames processed after frame 0.
    #[inline]
    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Length of the output synthesized so far.
    #[inline]
    pub fn valid_len(&self) -> usize {
        self.output.valid_len()
    }

    /// Capacity of the output signal.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.output.capacity()
    }

    /// The output synthesized so far.
    #[inline]
    pub fn output(&self) -> &[Sample] {
        self.output.valid()
    }

    /// Consumes the run and returns its output, truncated to the valid length.
    pub fn finish(self) -> Vec<Sample> {
        log::debug!(
            "SOLA done: {} output samples ({:?})",
            self.output.valid_len(),
            self.phase
        );
        self.output.into_samples()
    }

    fn process_frame(&mut self, index: usize) -> Result<FrameRecord, SolaError> {
        let geometry = FrameGeometry::new(index, self.frame_size, self.intervals);
        let choice = find_lag(&geometry, self.input, self.output.valid());
        let overlap = blend_frame(&geometry, self.input, &mut self.output, choice.lag)?;

        if let Some(position) = choice.lag.apply(geometry.nominal_start()) {
            self.output.mark_valid(position + self.frame_size);
        }

        let record = FrameRecord {
            index,
            lag: choice.lag,
            score: choice.score,
            overlap,
            valid_len: self.output.valid_len(),
        };
        log::trace!(
            "frame {}: lag {} score {:.4} overlap {} valid {}",
            record.index,
            record.lag,
            record.score,
            record.overlap,
            record.valid_len
        );
        Ok(record)
    }
}

impl Iterator for Synthesis<'_> {
    type Item = Result<FrameRecord, SolaError>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = match self.phase {
            Phase::Initialized => 1,
            Phase::Looping(m) => m + 1,
            Phase::Done => return None,
        };
        if index > self.max_frames {
            self.phase = Phase::Done;
            return None;
        }

        match self.process_frame(index) {
            Ok(record) => {
                self.phase = Phase::Looping(index);
                Some(Ok(record))
            }
            Err(err) => {
                self.phase = Phase::Done;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(len: usize, period: f64, amplitude: f64) -> Vec<Sample> {
        (0..len)
            .map(|i| (amplitude * (2.0 * std::f64::consts::PI * i as f64 / period).sin()) as i16)
            .collect()
    }

    #[test]
    fn test_engine_rejects_bad_configuration() {
        assert!(matches!(
            SolaEngine::new(1.0, 0),
            Err(SolaError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SolaEngine::new(0.0, 160),
            Err(SolaError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SolaEngine::new(f64::NAN, 160),
            Err(SolaError::InvalidConfiguration(_))
        ));
        // N = 1 gives Sa = 0
        assert!(matches!(
            SolaEngine::new(1.0, 1),
            Err(SolaError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_engine_input_too_short() {
        let engine = SolaEngine::new(1.5, 160).unwrap();
        let err = engine.process(&[0; 100]).unwrap_err();
        assert_eq!(
            err,
            SolaError::InsufficientData {
                provided: 100,
                minimum: 160
            }
        );
    }

    #[test]
    fn test_engine_exactly_one_frame() {
        let engine = SolaEngine::new(1.5, 160).unwrap();
        let input = sine(160, 40.0, 8000.0);
        let output = engine.run(&input).unwrap();
        assert!(output.frames.is_empty());
        assert_eq!(output.samples, input);
    }

    #[test]
    fn test_phases() {
        let engine = SolaEngine::new(1.0, 160).unwrap();
        let input = sine(400, 40.0, 8000.0);
        let mut synthesis = engine.start(&input).unwrap();
        assert_eq!(synthesis.phase(), Phase::Initialized);
        assert_eq!(synthesis.valid_len(), 160);
        assert_eq!(synthesis.capacity(), 560);
        // (400 - 160) / 80 = 3 frames
        assert_eq!(synthesis.max_frames(), 3);

        assert!(synthesis.next().unwrap().is_ok());
        assert_eq!(synthesis.phase(), Phase::Looping(1));
        assert_eq!(synthesis.by_ref().count(), 2);
        assert_eq!(synthesis.phase(), Phase::Done);
        assert!(synthesis.next().is_none());
    }

    #[test]
    fn test_record_valid_len_matches_lag() {
        let engine = SolaEngine::new(1.5, 160).unwrap();
        let input = sine(4000, 57.0, 10000.0);
        let output = engine.run(&input).unwrap();
        assert_eq!(output.frames.len(), engine.max_frames(input.len()));

        let mut previous = 160;
        for record in &output.frames {
            let end = (record.index * engine.intervals().synthesis) as isize
                + record.lag.get()
                + 160;
            assert_eq!(record.valid_len, previous.max(end as usize));
            previous = record.valid_len;
        }
        assert_eq!(output.samples.len(), previous);
    }

    #[test]
    fn test_process_matches_run() {
        let engine = SolaEngine::new(0.75, 200).unwrap();
        let input = sine(3000, 33.0, 12000.0);
        let a = engine.process(&input).unwrap();
        let b = engine.run(&input).unwrap();
        assert_eq!(a, b.samples);
    }
}
