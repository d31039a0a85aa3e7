/// A single audio sample (16-bit signed linear PCM).
pub type Sample = i16;

/// Mono 16-bit PCM signal with its sample rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    /// Sample data.
    pub samples: Vec<Sample>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl PcmBuffer {
    /// Create a new PCM buffer.
    pub fn new(samples: Vec<Sample>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer contains no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_buffer_duration() {
        let buf = PcmBuffer::new(vec![0; 8000], 8000);
        assert_eq!(buf.len(), 8000);
        assert!((buf.duration_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pcm_buffer_zero_rate() {
        let buf = PcmBuffer::new(vec![1, 2, 3], 0);
        assert_eq!(buf.duration_secs(), 0.0);
        assert!(!buf.is_empty());
    }
}
