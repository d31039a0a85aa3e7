//! Output signal buffer and overlap-add of analysis frames.

use crate::core::types::Sample;
use crate::core::window::{window, window_mut, Lag};
use crate::error::SolaError;
use crate::stretch::intervals::FrameGeometry;

/// Output signal under construction.
///
/// The buffer is allocated once with a fixed capacity. `valid_len` marks the
/// end of the region that has been synthesized; it only ever grows.
#[derive(Debug, Clone)]
pub struct OutputSignal {
    samples: Vec<Sample>,
    valid_len: usize,
}

impl OutputSignal {
    /// Allocates a zeroed output signal of `capacity` samples.
    ///
    /// # Errors
    /// Returns [`SolaError::ResourceExhausted`] if the allocation fails.
    pub fn allocate(capacity: usize) -> Result<Self, SolaError> {
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(capacity)
            .map_err(|_| SolaError::ResourceExhausted {
                requested: capacity,
            })?;
        samples.resize(capacity, 0);
        Ok(Self {
            samples,
            valid_len: 0,
        })
    }

    /// Total number of samples the signal can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Length of the synthesized region.
    #[inline]
    pub fn valid_len(&self) -> usize {
        self.valid_len
    }

    /// The synthesized region.
    #[inline]
    pub fn valid(&self) -> &[Sample] {
        &self.samples[..self.valid_len]
    }

    /// Copies `frame` to the start of the signal and marks it valid.
    pub fn seed(&mut self, frame: &[Sample]) -> Result<(), SolaError> {
        let capacity = self.capacity();
        let dest = window_mut(&mut self.samples, 0, frame.len()).ok_or(
            SolaError::CapacityExceeded {
                frame: 0,
                required: frame.len(),
                capacity,
            },
        )?;
        dest.copy_from_slice(frame);
        self.valid_len = self.valid_len.max(frame.len());
        Ok(())
    }

    /// Extends the valid region to `end` if it lies beyond the current end.
    pub fn mark_valid(&mut self, end: usize) {
        self.valid_len = self.valid_len.max(end.min(self.capacity()));
    }

    /// Consumes the signal, returning only its synthesized region.
    pub fn into_samples(mut self) -> Vec<Sample> {
        self.samples.truncate(self.valid_len);
        self.samples
    }
}

/// Linear crossfade from `old` (weight 0) to `new` (weight 1).
#[inline]
fn crossfade(old: Sample, new: Sample, weight: f64) -> Sample {
    let old = old as f64;
    // The result lies between old and new, so it always fits a sample.
    (old + weight * (new as f64 - old)).round() as Sample
}

/// Writes the analysis frame of `geometry` into `output` at `m * Ss + lag`.
///
/// Over the overlap with the valid output the frame is crossfaded in with a
/// linear ramp; the rest of the frame is copied. The valid length of
/// `output` is not changed. Returns the overlap length used.
///
/// # Errors
/// - [`SolaError::LagOutOfRange`] if the lag places the frame before zero.
/// - [`SolaError::CapacityExceeded`] if the frame does not fit the output.
/// - [`SolaError::InsufficientData`] if the analysis frame runs past the input.
pub fn blend_frame(
    geometry: &FrameGeometry,
    input: &[Sample],
    output: &mut OutputSignal,
    lag: Lag,
) -> Result<usize, SolaError> {
    let n = geometry.frame_size;
    let position = lag
        .apply(geometry.nominal_start())
        .ok_or(SolaError::LagOutOfRange {
            frame: geometry.index,
            lag: lag.get(),
        })?;

    let analysis = geometry.analysis_start();
    let frame = window(input, analysis, n).ok_or(SolaError::InsufficientData {
        provided: input.len(),
        minimum: analysis + n,
    })?;

    let overlap = geometry.overlap_at(position, output.valid_len());
    let capacity = output.capacity();
    let dest = window_mut(&mut output.samples, position, n).ok_or(
        SolaError::CapacityExceeded {
            frame: geometry.index,
            required: position + n,
            capacity,
        },
    )?;

    let (faded, appended) = dest.split_at_mut(overlap);
    for (j, (out, &new)) in faded.iter_mut().zip(frame).enumerate() {
        let weight = j as f64 / overlap as f64;
        *out = crossfade(*out, new, weight);
    }
    appended.copy_from_slice(&frame[overlap..]);

    Ok(overlap)
}
