//! Audio containers: `.au` (μ-law) and 16-bit PCM WAV.

pub mod au;
pub mod mulaw;
pub mod wav;

use crate::core::types::PcmBuffer;
use crate::error::SolaError;
use std::path::Path;

/// Supported audio containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Sun/NeXT `.au`, 8-bit μ-law.
    Au,
    /// RIFF/WAVE, 16-bit PCM.
    Wav,
}

impl Container {
    /// Guesses the container of encoded bytes.
    ///
    /// Anything that is not RIFF is treated as `.au`, whose reader rejects a
    /// wrong magic number.
    pub fn sniff(data: &[u8]) -> Self {
        if data.starts_with(b"RIFF") {
            Container::Wav
        } else {
            Container::Au
        }
    }

    /// Picks the container for a destination path: `.wav` gives WAV, anything else `.au`.
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("wav") => Container::Wav,
            _ => Container::Au,
        }
    }
}

/// Decodes one channel (0-based) of an encoded file, detecting its container.
pub fn read_audio(data: &[u8], channel: usize) -> Result<PcmBuffer, SolaError> {
    match Container::sniff(data) {
        Container::Au => au::read_au(data, channel),
        Container::Wav => wav::read_wav(data, channel),
    }
}

/// Encodes a buffer in the given container.
pub fn encode_audio(container: Container, buffer: &PcmBuffer) -> Vec<u8> {
    match container {
        Container::Au => au::write_au(buffer),
        Container::Wav => wav::write_wav(buffer),
    }
}
