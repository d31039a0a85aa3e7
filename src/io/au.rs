//! Sun/NeXT `.au` container with 8-bit μ-law data.
//!
//! Header layout (all fields big-endian `u32`, 32 bytes total):
//!
//! | offset | field |
//! |---|---|
//! | 0 | magic `0x2e736e64` (".snd") |
//! | 4 | data offset |
//! | 8 | data size in bytes (`0xFFFFFFFF` = unknown) |
//! | 12 | data format (1 = 8-bit μ-law) |
//! | 16 | sample rate |
//! | 20 | channel count |
//! | 24 | info |
//! | 28 | reserved |

use crate::core::types::{PcmBuffer, Sample};
use crate::error::SolaError;
use crate::io::mulaw;

/// ".snd"
pub const AU_MAGIC: u32 = 0x2e73_6e64;
/// Size of the header written by [`write_au`].
pub const AU_HEADER_LEN: usize = 32;
/// Data format code for 8-bit G.711 μ-law.
pub const AU_FORMAT_MULAW_8: u32 = 1;
/// Data size value meaning "until end of file".
pub const AU_UNKNOWN_SIZE: u32 = 0xFFFF_FFFF;

/// Parsed `.au` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuHeader {
    pub magic: u32,
    pub data_offset: u32,
    pub data_size: u32,
    pub data_format: u32,
    pub sample_rate: u32,
    pub channels: u32,
    pub info: u32,
    pub reserved: u32,
}

impl AuHeader {
    /// Header for a mono μ-law file holding `num_samples` samples.
    pub fn mono_mulaw(num_samples: usize, sample_rate: u32) -> Self {
        Self {
            magic: AU_MAGIC,
            data_offset: AU_HEADER_LEN as u32,
            data_size: num_samples as u32,
            data_format: AU_FORMAT_MULAW_8,
            sample_rate,
            channels: 1,
            info: 0,
            reserved: 0,
        }
    }

    /// Decodes the big-endian header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, SolaError> {
        if data.len() < AU_HEADER_LEN {
            return Err(SolaError::MalformedInput(format!(
                "AU file too short: {} bytes, header needs {}",
                data.len(),
                AU_HEADER_LEN
            )));
        }
        Ok(Self {
            magic: read_u32_be(data, 0),
            data_offset: read_u32_be(data, 4),
            data_size: read_u32_be(data, 8),
            data_format: read_u32_be(data, 12),
            sample_rate: read_u32_be(data, 16),
            channels: read_u32_be(data, 20),
            info: read_u32_be(data, 24),
            reserved: read_u32_be(data, 28),
        })
    }

    /// Encodes the header as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; AU_HEADER_LEN] {
        let fields = [
            self.magic,
            self.data_offset,
            self.data_size,
            self.data_format,
            self.sample_rate,
            self.channels,
            self.info,
            self.reserved,
        ];
        let mut out = [0u8; AU_HEADER_LEN];
        for (chunk, field) in out.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        out
    }

    /// Checks the fields this reader depends on.
    fn validate(&self, channel: usize) -> Result<(), SolaError> {
        if self.magic != AU_MAGIC {
            return Err(SolaError::MalformedInput(format!(
                "bad AU magic number {:#010x}, expected {:#010x}",
                self.magic, AU_MAGIC
            )));
        }
        if self.data_format != AU_FORMAT_MULAW_8 {
            return Err(SolaError::MalformedInput(format!(
                "unsupported AU data format {}, only 8-bit mu-law ({}) is supported",
                self.data_format, AU_FORMAT_MULAW_8
            )));
        }
        if self.channels == 0 {
            return Err(SolaError::MalformedInput(
                "AU header declares zero channels".to_string(),
            ));
        }
        if channel >= self.channels as usize {
            return Err(SolaError::MalformedInput(format!(
                "channel {} requested but file has {} channel(s)",
                channel + 1,
                self.channels
            )));
        }
        if self.sample_rate == 0 {
            return Err(SolaError::MalformedInput(
                "AU header declares a zero sample rate".to_string(),
            ));
        }
        if (self.data_offset as usize) < AU_HEADER_LEN {
            return Err(SolaError::MalformedInput(format!(
                "AU data offset {} overlaps the header",
                self.data_offset
            )));
        }
        Ok(())
    }
}

/// Reads one channel (0-based) of an `.au` file from a byte slice.
///
/// The header is fully validated before any sample buffer is allocated.
pub fn read_au(data: &[u8], channel: usize) -> Result<PcmBuffer, SolaError> {
    let header = AuHeader::parse(data)?;
    header.validate(channel)?;

    let offset = header.data_offset as usize;
    let available = data.get(offset..).ok_or_else(|| {
        SolaError::MalformedInput(format!(
            "AU data offset {} is past the end of the file ({} bytes)",
            offset,
            data.len()
        ))
    })?;

    let payload = if header.data_size == AU_UNKNOWN_SIZE {
        available
    } else {
        let size = header.data_size as usize;
        available.get(..size).ok_or_else(|| {
            SolaError::MalformedInput(format!(
                "AU data truncated: header declares {} bytes, {} present",
                size,
                available.len()
            ))
        })?
    };

    let num_channels = header.channels as usize;
    let samples: Vec<Sample> = payload
        .chunks_exact(num_channels)
        .map(|frame| mulaw::decode(frame[channel]))
        .collect();

    log::debug!(
        "AU: {} Hz, {} channel(s), {} samples from channel {}",
        header.sample_rate,
        num_channels,
        samples.len(),
        channel + 1
    );

    Ok(PcmBuffer::new(samples, header.sample_rate))
}

/// Reads one channel (0-based) of an `.au` file from disk.
pub fn read_au_file(path: &str, channel: usize) -> Result<PcmBuffer, SolaError> {
    let data = std::fs::read(path).map_err(|e| SolaError::Io(format!("{}: {}", path, e)))?;
    read_au(&data, channel)
}

/// Encodes a buffer as a mono μ-law `.au` file.
pub fn write_au(buffer: &PcmBuffer) -> Vec<u8> {
    let header = AuHeader::mono_mulaw(buffer.samples.len(), buffer.sample_rate);
    let mut out = Vec::with_capacity(AU_HEADER_LEN + buffer.samples.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend(buffer.samples.iter().map(|&s| mulaw::encode(s)));
    out
}

/// Writes a buffer to disk as a mono μ-law `.au` file.
pub fn write_au_file(path: &str, buffer: &PcmBuffer) -> Result<(), SolaError> {
    std::fs::write(path, write_au(buffer)).map_err(|e| SolaError::Io(format!("{}: {}", path, e)))
}

#[inline]
fn read_u32_be(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
