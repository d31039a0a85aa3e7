//! Error types for the sola crate.

use thiserror::Error;

/// Errors that can occur while loading, time-scaling or writing audio.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolaError {
    /// Time-scale factor or frame size outside the accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Input too short for the configured frame size.
    #[error("insufficient data: {provided} samples provided, {minimum} required")]
    InsufficientData { provided: usize, minimum: usize },
    /// The output signal could not be allocated.
    #[error("cannot allocate an output signal of {requested} samples")]
    ResourceExhausted { requested: usize },
    /// A frame would be written past the end of the output signal.
    #[error("frame {frame} needs {required} output samples but capacity is {capacity}")]
    CapacityExceeded {
        frame: usize,
        required: usize,
        capacity: usize,
    },
    /// A lag moved the synthesis position before the start of the output.
    #[error("lag {lag} of frame {frame} moves the synthesis position below zero")]
    LagOutOfRange { frame: usize, lag: isize },
    /// Invalid or unsupported container data.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
    /// A run report could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for SolaError {
    fn from(err: std::io::Error) -> Self {
        SolaError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SolaError {
    fn from(err: serde_json::Error) -> Self {
        SolaError::Serialization(err.to_string())
    }
}
