//! PCM sample normalization
//!
//! Capture hands over 16-bit signed little-endian PCM; the pipeline works
//! on mono f64 amplitudes in [-1, 1).

use thiserror::Error;

/// Divisor mapping i16 onto [-1, 1)
pub const I16_SCALE: f64 = 32768.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PcmError {
    #[error("Channel count must be at least 1")]
    NoChannels,
}

/// Normalize one 16-bit sample
#[inline]
pub fn normalize_i16(sample: i16) -> f64 {
    sample as f64 / I16_SCALE
}

/// Decode 16-bit signed little-endian bytes into normalized samples
///
/// A trailing odd byte is not a whole sample and is ignored.
pub fn decode_pcm16_le(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(2)
        .map(|pair| normalize_i16(i16::from_le_bytes([pair[0], pair[1]])))
        .collect()
}

/// Average interleaved frames down to one channel
///
/// A trailing partial frame is dropped.
pub fn downmix_to_mono(interleaved: &[f64], channels: u16) -> Result<Vec<f64>, PcmError> {
    let channels = channels as usize;
    if channels == 0 {
        return Err(PcmError::NoChannels);
    }
    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize_i16(0), 0.0);
        assert_eq!(normalize_i16(i16::MIN), -1.0);
        assert_eq!(normalize_i16(16384), 0.5);
        assert!(normalize_i16(i16::MAX) < 1.0);
    }

    #[test]
    fn test_decode_little_endian() {
        // 0x4000 = 16384, 0xC000 = -16384
        let bytes = [0x00, 0x40, 0x00, 0xC0, 0xFF, 0x7F];
        let samples = decode_pcm16_le(&bytes);
        assert_eq!(samples, vec![0.5, -0.5, 32767.0 / 32768.0]);
    }

    #[test]
    fn test_decode_drops_trailing_byte() {
        assert_eq!(decode_pcm16_le(&[0x00, 0x40, 0x00]), vec![0.5]);
        assert_eq!(decode_pcm16_le(&[0x7F]), Vec::<f64>::new());
        assert!(decode_pcm16_le(&[]).is_empty());
    }

    #[test]
    fn test_downmix() {
        let stereo = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0, 0.25];
        assert_eq!(downmix_to_mono(&stereo, 2).unwrap(), vec![0.5, 0.5, 0.0]);
        assert_eq!(downmix_to_mono(&stereo, 1).unwrap(), stereo.to_vec());
        assert_eq!(downmix_to_mono(&stereo, 0), Err(PcmError::NoChannels));
    }
}
