//! Summary of a completed time-scale modification run.

use crate::error::SolaError;
use crate::stretch::engine::SolaEngine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a run consumed and produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolaReport {
    /// Time-scale factor.
    pub alpha: f64,
    /// Frame size in samples.
    pub frame_size: usize,
    /// Analysis interval Sa.
    pub analysis_interval: usize,
    /// Synthesis interval Ss.
    pub synthesis_interval: usize,
    /// Frames synthesized after the first.
    pub frames: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Input length in samples.
    pub input_samples: usize,
    /// Output length in samples.
    pub output_samples: usize,
    /// Size of the source file in bytes.
    #[serde(default)]
    pub bytes_read: usize,
    /// Size of the destination file in bytes.
    #[serde(default)]
    pub bytes_written: usize,
}

impl SolaReport {
    /// Report for a run of `engine`, with file sizes left at zero.
    pub fn new(
        engine: &SolaEngine,
        sample_rate: u32,
        input_samples: usize,
        output_samples: usize,
        frames: usize,
    ) -> Self {
        let intervals = engine.intervals();
        Self {
            alpha: engine.alpha(),
            frame_size: engine.frame_size(),
            analysis_interval: intervals.analysis,
            synthesis_interval: intervals.synthesis,
            frames,
            sample_rate,
            input_samples,
            output_samples,
            bytes_read: 0,
            bytes_written: 0,
        }
    }

    /// Sets the source and destination file sizes.
    pub fn with_file_sizes(mut self, bytes_read: usize, bytes_written: usize) -> Self {
        self.bytes_read = bytes_read;
        self.bytes_written = bytes_written;
        self
    }

    /// Achieved ratio of output to input length.
    pub fn actual_ratio(&self) -> f64 {
        if self.input_samples == 0 {
            return 0.0;
        }
        self.output_samples as f64 / self.input_samples as f64
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SolaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for SolaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SOLA report:")?;
        writeln!(f, "  Time-scale factor:       {:.2}", self.alpha)?;
        writeln!(f, "  Frame size:              {}", self.frame_size)?;
        writeln!(
            f,
            "  Intervals (Sa / Ss):     {} / {}",
            self.analysis_interval, self.synthesis_interval
        )?;
        writeln!(f, "  Frames:                  {}", self.frames)?;
        writeln!(
            f,
            "  Samples in / out:        {} / {} (ratio {:.4})",
            self.input_samples,
            self.output_samples,
            self.actual_ratio()
        )?;
        writeln!(f, "  Number of bytes read:    {}", self.bytes_read)?;
        write!(f, "  Number of bytes written: {}", self.bytes_written)
    }
}
