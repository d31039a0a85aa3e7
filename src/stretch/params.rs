use crate::error::SolaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest accepted time-scale factor.
pub const MIN_ALPHA: f64 = 0.5;
/// Largest accepted time-scale factor.
pub const MAX_ALPHA: f64 = 2.0;
/// Smallest accepted frame size in samples.
pub const MIN_FRAME_SIZE: usize = 25;
/// Largest accepted frame size in samples.
pub const MAX_FRAME_SIZE: usize = 1000;
/// Frame size used when none is given (20 ms at 8 kHz).
pub const DEFAULT_FRAME_SIZE: usize = 160;

/// Parameters controlling one time-scale modification run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolaParams {
    /// Time-scale factor: >1.0 = longer (slower), <1.0 = shorter (faster).
    pub alpha: f64,
    /// Size of the overlapping frames in samples (default: 160).
    #[serde(default = "default_frame_size")]
    pub frame_size: usize,
}

fn default_frame_size() -> usize {
    DEFAULT_FRAME_SIZE
}

impl SolaParams {
    /// Create parameters with the given time-scale factor and the default frame size.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            frame_size: DEFAULT_FRAME_SIZE,
        }
    }

    /// Set the frame size.
    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    /// Checks α and N against the accepted ranges.
    pub fn validate(&self) -> Result<(), SolaError> {
        validate_params(self).map_err(SolaError::InvalidConfiguration)
    }
}

impl fmt::Display for SolaParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alpha={:.2}, frame_size={}", self.alpha, self.frame_size)
    }
}

/// Validates user-facing parameters, returning a message for the first violation.
pub fn validate_params(params: &SolaParams) -> Result<(), String> {
    if !params.alpha.is_finite() || params.alpha < MIN_ALPHA || params.alpha > MAX_ALPHA {
        return Err(format!(
            "<alpha> must range from {:.1} to {:.1}, got {}",
            MIN_ALPHA, MAX_ALPHA, params.alpha
        ));
    }
    if params.frame_size < MIN_FRAME_SIZE || params.frame_size > MAX_FRAME_SIZE {
        return Err(format!(
            "<framesize> must range from {} to {}, got {}",
            MIN_FRAME_SIZE, MAX_FRAME_SIZE, params.frame_size
        ));
    }
    Ok(())
}
