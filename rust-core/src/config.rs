//! Construction-time detector configuration

use crate::filters::design::{DesignError, LowpassSpec};
use crate::spectrum::analysis::EstimatorConfig;

/// Capture sample rate the detector is built for, in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Low-pass cutoff in Hz
pub const DEFAULT_CUTOFF_HZ: f64 = 1000.0;

/// Number of FIR taps
pub const DEFAULT_FILTER_ORDER: usize = 64;

/// Detector configuration
///
/// Fixed for the lifetime of a `NoteProcessor`; changing any value means
/// building a new processor.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Sample rate in Hz every incoming block must match
    pub sample_rate: u32,

    /// Low-pass cutoff in Hz
    pub cutoff_hz: f64,

    /// Number of FIR taps
    pub filter_order: usize,

    /// Pre-DFT window and peak-search range
    pub estimator: EstimatorConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            filter_order: DEFAULT_FILTER_ORDER,
            estimator: EstimatorConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Hamming-windowed low-pass design for this configuration
    pub fn lowpass_spec(&self) -> LowpassSpec {
        LowpassSpec::new(self.sample_rate, self.cutoff_hz, self.filter_order)
    }

    pub fn validate(&self) -> Result<(), DesignError> {
        self.lowpass_spec().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::windows::WindowType;
    use crate::spectrum::analysis::SpectrumRange;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.cutoff_hz, 1000.0);
        assert_eq!(config.filter_order, 64);
        assert_eq!(config.estimator.window_type, WindowType::Rectangular);
        assert_eq!(config.estimator.range, SpectrumRange::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_cutoff_above_nyquist() {
        let config = DetectorConfig {
            cutoff_hz: 30000.0,
            ..DetectorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DesignError::CutoffOutOfRange { .. })
        ));
    }
}
