#![forbid(unsafe_code)]
//! Time-scale modification of 16-bit PCM audio with synchronized overlap-add.
//!
//! `sola` lengthens or shortens a signal by a factor α without changing its
//! pitch. Fixed-size frames are cut from the input every Sa samples and laid
//! down every Ss samples in the output; each frame is slid within ±N/2 to the
//! position where it best matches what is already there (normalized
//! cross-correlation), then linearly crossfaded in.
//!
//! # Quick Start
//!
//! ```
//! use sola::SolaParams;
//!
//! // 1 second of 200 Hz sine at 8 kHz
//! let input: Vec<i16> = (0..8000)
//!     .map(|i| {
//!         let phase = 2.0 * std::f64::consts::PI * 200.0 * i as f64 / 8000.0;
//!         (8000.0 * phase.sin()) as i16
//!     })
//!     .collect();
//!
//! let params = SolaParams::new(1.5).with_frame_size(160);
//! let output = sola::time_scale(&input, &params).unwrap();
//! assert!(output.len() > input.len()); // ~1.5x longer
//! ```
//!
//! # Frame by frame
//!
//! [`SolaEngine::start`] returns a [`Synthesis`] that processes one frame per
//! iteration and reports the lag it chose:
//!
//! ```
//! use sola::SolaEngine;
//!
//! let input = vec![0i16; 1000];
//! let engine = SolaEngine::new(2.0, 100).unwrap();
//! let mut synthesis = engine.start(&input).unwrap();
//! for record in synthesis.by_ref() {
//!     let record = record.unwrap();
//!     assert!(record.overlap >= 100 / 8);
//! }
//! let output = synthesis.finish();
//! assert!(output.len() <= engine.capacity_for(input.len()));
//! ```

pub mod core;
pub mod error;
pub mod io;
pub mod stretch;

pub use core::report::SolaReport;
pub use core::types::{PcmBuffer, Sample};
pub use core::window::Lag;
pub use error::SolaError;
pub use io::Container;
pub use stretch::{FrameRecord, Phase, SolaEngine, SolaOutput, SolaParams, Synthesis};

/// Time-scales a mono signal by `params.alpha`.
///
/// The parameters are range-checked first (α in [0.5, 2.0], N in [25, 1000]).
///
/// # Errors
/// - [`SolaError::InvalidConfiguration`] for out-of-range parameters.
/// - [`SolaError::InsufficientData`] if the input is shorter than one frame.
/// - [`SolaError::ResourceExhausted`] if the output cannot be allocated.
pub fn time_scale(input: &[Sample], params: &SolaParams) -> Result<Vec<Sample>, SolaError> {
    params.validate()?;
    SolaEngine::from_params(params)?.process(input)
}

/// Time-scales a [`PcmBuffer`], keeping its sample rate.
pub fn time_scale_buffer(
    buffer: &PcmBuffer,
    params: &SolaParams,
) -> Result<PcmBuffer, SolaError> {
    let samples = time_scale(&buffer.samples, params)?;
    Ok(PcmBuffer::new(samples, buffer.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_scale_validates() {
        let input = vec![0i16; 1000];
        assert!(matches!(
            time_scale(&input, &SolaParams::new(2.5)),
            Err(SolaError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            time_scale(&input, &SolaParams::new(1.0).with_frame_size(24)),
            Err(SolaError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_time_scale_buffer_keeps_rate() {
        let buffer = PcmBuffer::new(vec![100; 2000], 11025);
        let output = time_scale_buffer(&buffer, &SolaParams::new(0.5)).unwrap();
        assert_eq!(output.sample_rate, 11025);
        assert!(output.len() < buffer.len());
        assert!(output.samples.iter().all(|&s| s == 100));
    }
}
