use crate::core::types::{PcmBuffer, Sample};
use crate::error::SolaError;

/// WAV audio format code for integer PCM.
const WAV_FORMAT_PCM: u16 = 1;
/// Size of the canonical header written by [`write_wav`].
const WAV_HEADER_LEN: usize = 44;

/// Reads one channel (0-based) of a 16-bit PCM WAV file from a byte slice.
pub fn read_wav(data: &[u8], channel: usize) -> Result<PcmBuffer, SolaError> {
    if data.len() < 12 {
        return Err(SolaError::MalformedInput(
            "WAV file too short".to_string(),
        ));
    }
    if &data[0..4] != b"RIFF" {
        return Err(SolaError::MalformedInput(
            "Missing RIFF header".to_string(),
        ));
    }
    if &data[8..12] != b"WAVE" {
        return Err(SolaError::MalformedInput(
            "Missing WAVE identifier".to_string(),
        ));
    }

    let mut cursor: usize = 12;
    let mut format: Option<(u16, u16, u32, u16)> = None;
    let mut audio_data: Option<&[u8]> = None;

    while let Some(chunk_header) = cursor.checked_add(8).and_then(|end| data.get(cursor..end)) {
        let chunk_id = &chunk_header[0..4];
        let chunk_size = u32::from_le_bytes([
            chunk_header[4],
            chunk_header[5],
            chunk_header[6],
            chunk_header[7],
        ]) as usize;
        cursor += 8;

        if chunk_id == b"fmt " {
            let fmt = data
                .get(cursor..cursor + 16)
                .filter(|_| chunk_size >= 16)
                .ok_or_else(|| SolaError::MalformedInput("fmt chunk too short".to_string()))?;
            format = Some((
                u16::from_le_bytes([fmt[0], fmt[1]]),
                u16::from_le_bytes([fmt[2], fmt[3]]),
                u32::from_le_bytes([fmt[4], fmt[5], fmt[6], fmt[7]]),
                // skip byte rate (4 bytes) and block align (2 bytes)
                u16::from_le_bytes([fmt[14], fmt[15]]),
            ));
        } else if chunk_id == b"data" {
            let end = cursor.saturating_add(chunk_size).min(data.len());
            audio_data = data.get(cursor..end);
        }

        cursor = cursor.saturating_add(chunk_size);
        // WAV chunks are word-aligned
        if chunk_size % 2 != 0 {
            cursor = cursor.saturating_add(1);
        }
    }

    let (format_code, num_channels, sample_rate, bits_per_sample) = format
        .ok_or_else(|| SolaError::MalformedInput("No fmt chunk found".to_string()))?;
    let audio_data =
        audio_data.ok_or_else(|| SolaError::MalformedInput("No data chunk found".to_string()))?;

    if (format_code, bits_per_sample) != (WAV_FORMAT_PCM, 16) {
        return Err(SolaError::MalformedInput(format!(
            "Unsupported WAV format: code={}, bits={} (16-bit PCM required)",
            format_code, bits_per_sample
        )));
    }
    if num_channels == 0 || sample_rate == 0 {
        return Err(SolaError::MalformedInput(format!(
            "Invalid WAV format: {} channel(s) at {} Hz",
            num_channels, sample_rate
        )));
    }
    if channel >= num_channels as usize {
        return Err(SolaError::MalformedInput(format!(
            "channel {} requested but file has {} channel(s)",
            channel + 1,
            num_channels
        )));
    }

    let frame_bytes = num_channels as usize * 2;
    let samples: Vec<Sample> = audio_data
        .chunks_exact(frame_bytes)
        .map(|frame| i16::from_le_bytes([frame[channel * 2], frame[channel * 2 + 1]]))
        .collect();

    log::debug!(
        "WAV: {} Hz, {} channel(s), {} samples from channel {}",
        sample_rate,
        num_channels,
        samples.len(),
        channel + 1
    );

    Ok(PcmBuffer::new(samples, sample_rate))
}

/// Reads one channel (0-based) of a WAV file from disk.
pub fn read_wav_file(path: &str, channel: usize) -> Result<PcmBuffer, SolaError> {
    let data = std::fs::read(path).map_err(|e| SolaError::Io(format!("{}: {}", path, e)))?;
    read_wav(&data, channel)
}

/// Encodes a buffer as a mono 16-bit PCM WAV file.
pub fn write_wav(buffer: &PcmBuffer) -> Vec<u8> {
    let num_channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let byte_rate = buffer.sample_rate * num_channels as u32 * (bits_per_sample as u32 / 8);
    let block_align = num_channels * (bits_per_sample / 8);
    let data_size = (buffer.samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_size as usize);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&WAV_FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&num_channels.to_le_bytes());
    out.extend_from_slice(&buffer.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    for &sample in &buffer.samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }

    out
}

/// Writes a buffer to disk as a mono 16-bit PCM WAV file.
pub fn write_wav_file(path: &str, buffer: &PcmBuffer) -> Result<(), SolaError> {
    std::fs::write(path, write_wav(buffer)).map_err(|e| SolaError::Io(format!("{}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo_wav(frames: &[(i16, i16)], sample_rate: u32) -> Vec<u8> {
        let data_size = (frames.len() * 4) as u32;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_size).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * 4).to_le_bytes());
        out.extend_from_slice(&4u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_size.to_le_bytes());
        for &(l, r) in frames {
            out.extend_from_slice(&l.to_le_bytes());
            out.extend_from_slice(&r.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_wav_roundtrip() {
        let original = PcmBuffer::new(vec![0, 1, -1, i16::MAX, i16::MIN, 1234], 16000);
        let bytes = write_wav(&original);
        assert_eq!(bytes.len(), WAV_HEADER_LEN + 12);
        let decoded = read_wav(&bytes, 0).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_wav_channel_extraction() {
        let bytes = stereo_wav(&[(1, -1), (2, -2), (3, -3)], 8000);
        assert_eq!(read_wav(&bytes, 0).unwrap().samples, vec![1, 2, 3]);
        assert_eq!(read_wav(&bytes, 1).unwrap().samples, vec![-1, -2, -3]);
        assert!(read_wav(&bytes, 2).is_err());
    }

    #[test]
    fn test_wav_skips_unknown_chunks() {
        let original = PcmBuffer::new(vec![5, 6, 7], 8000);
        let plain = write_wav(&original);
        // Insert an odd-sized LIST chunk (with pad byte) before the data chunk.
        let mut list = b"LIST".to_vec();
        list.extend_from_slice(&3u32.to_le_bytes());
        list.extend_from_slice(&[1, 2, 3, 0]);
        let bytes = [&plain[..36], &list[..], &plain[36..]].concat();
        assert_eq!(read_wav(&bytes, 0).unwrap(), original);
    }

    #[test]
    fn test_wav_rejects_float() {
        let mut bytes = write_wav(&PcmBuffer::new(vec![0; 4], 8000));
        bytes[20..22].copy_from_slice(&3u16.to_le_bytes());
        let err = read_wav(&bytes, 0).unwrap_err();
        assert!(matches!(err, SolaError::MalformedInput(ref m) if m.contains("Unsupported")));
    }

    #[test]
    fn test_wav_invalid_data() {
        assert!(read_wav(&[], 0).is_err());
        assert!(read_wav(b"NOT_RIFF_HEADER_AT_ALL______________________", 0).is_err());
    }
}
