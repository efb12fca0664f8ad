//! Owned audio block handed from capture to the pipeline

use super::pcm::{decode_pcm16_le, downmix_to_mono, PcmError};

/// One capture callback's worth of normalized samples
///
/// Samples are interleaved when `channel_count > 1`. A block is immutable
/// once built and is moved, not shared, when crossing threads.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBlock {
    samples: Vec<f64>,
    sample_rate: u32,
    channel_count: u16,
}

impl AudioBlock {
    pub fn new(samples: Vec<f64>, sample_rate: u32, channel_count: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channel_count,
        }
    }

    /// Single-channel block
    pub fn mono(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self::new(samples, sample_rate, 1)
    }

    /// Block decoded from 16-bit signed little-endian PCM bytes
    pub fn from_pcm16_le(bytes: &[u8], sample_rate: u32, channel_count: u16) -> Self {
        Self::new(decode_pcm16_le(bytes), sample_rate, channel_count)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Number of complete frames
    pub fn frames(&self) -> usize {
        match self.channel_count {
            0 => 0,
            n => self.samples.len() / n as usize,
        }
    }

    /// Mono samples, averaging channels when interleaved
    pub fn to_mono(&self) -> Result<Vec<f64>, PcmError> {
        downmix_to_mono(&self.samples, self.channel_count)
    }
}
