//! Low-pass FIR design using the windowed-sinc method
//!
//! Coefficients are computed once from (sample rate, cutoff, order) and are
//! immutable afterwards.

use super::windows::WindowType;
use num_complex::Complex64;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error("Sample rate must be positive")]
    NonPositiveSampleRate,

    #[error(
        "Cutoff frequency {cutoff_hz} Hz must lie strictly between 0 and Nyquist ({nyquist_hz} Hz)"
    )]
    CutoffOutOfRange { cutoff_hz: f64, nyquist_hz: f64 },

    #[error("Filter order must be at least 2 (got {0})")]
    OrderTooSmall(usize),

    #[error("Filter needs at least one coefficient")]
    EmptyCoefficients,
}

/// Parameters of a windowed-sinc low-pass design
#[derive(Debug, Clone, PartialEq)]
pub struct LowpassSpec {
    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Cutoff frequency in Hz, strictly inside (0, sample_rate / 2)
    pub cutoff_hz: f64,

    /// Number of taps
    pub order: usize,

    /// Taper applied to the ideal sinc kernel
    pub window_type: WindowType,
}

impl LowpassSpec {
    /// Hamming-windowed low-pass spec
    pub fn new(sample_rate: u32, cutoff_hz: f64, order: usize) -> Self {
        Self {
            sample_rate,
            cutoff_hz,
            order,
            window_type: WindowType::Hamming,
        }
    }

    /// Replace the taper (Rectangular gives the bare truncated sinc)
    pub fn with_window(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    /// Nyquist frequency in Hz
    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Digital cutoff ratio fc = cutoff / sample_rate
    pub fn normalized_cutoff(&self) -> f64 {
        self.cutoff_hz / self.sample_rate as f64
    }

    /// Index of the center tap, (order - 1) / 2 rounded down
    pub fn center_index(&self) -> usize {
        self.order.saturating_sub(1) / 2
    }

    /// Check parameters, rejecting rather than clamping
    pub fn validate(&self) -> Result<(), DesignError> {
        if self.sample_rate == 0 {
            return Err(DesignError::NonPositiveSampleRate);
        }

        let nyquist_hz = self.nyquist_hz();
        // Written so that NaN fails the check too
        if !(self.cutoff_hz > 0.0 && self.cutoff_hz < nyquist_hz) {
            return Err(DesignError::CutoffOutOfRange {
                cutoff_hz: self.cutoff_hz,
                nyquist_hz,
            });
        }

        // The Hamming taper divides by order - 1
        if self.order < 2 {
            return Err(DesignError::OrderTooSmall(self.order));
        }

        Ok(())
    }
}

/// Fixed, non-empty FIR tap sequence
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    taps: Vec<f64>,
}

impl FilterCoefficients {
    /// Wrap externally designed taps
    pub fn from_taps(taps: Vec<f64>) -> Result<Self, DesignError> {
        if taps.is_empty() {
            return Err(DesignError::EmptyCoefficients);
        }
        Ok(Self { taps })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Never true for a constructed value
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Gain at 0 Hz (sum of taps)
    pub fn dc_gain(&self) -> f64 {
        self.taps.iter().sum()
    }
}

/// Ideal (unwindowed) low-pass tap at signed offset `k` from the center
fn ideal_lowpass_tap(fc: f64, k: i64) -> f64 {
    if k == 0 {
        2.0 * fc
    } else {
        let k = k as f64;
        (2.0 * PI * fc * k).sin() / (PI * k)
    }
}

/// Design a low-pass FIR filter
///
/// # Algorithm
/// 1. Ideal sinc kernel centered at `(order - 1) / 2`:
///    `2*fc` at the center, `sin(2π·fc·k) / (π·k)` at offset `k`
/// 2. Multiply tap `i` by the window value `w[i]`
///
/// # Returns
/// `order` coefficients, or the reason the spec was rejected
pub fn design_lowpass_fir(spec: &LowpassSpec) -> Result<FilterCoefficients, DesignError> {
    spec.validate()?;

    let fc = spec.normalized_cutoff();
    let center = spec.center_index() as i64;

    let taps = (0..spec.order)
        .map(|i| {
            let h_ideal = ideal_lowpass_tap(fc, i as i64 - center);
            h_ideal * spec.window_type.value(i, spec.order)
        })
        .collect();

    FilterCoefficients::from_taps(taps)
}

/// Calculate frequency response at given frequencies
///
/// # Arguments
/// * `h` - Filter coefficients
/// * `frequencies_hz` - Frequencies to evaluate, in Hz
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// Complex frequency response H(e^jω)
pub fn frequency_response(h: &[f64], frequencies_hz: &[f64], sample_rate: u32) -> Vec<Complex64> {
    frequencies_hz
        .iter()
        .map(|&f| {
            let omega = 2.0 * PI * f / sample_rate as f64;
            h.iter()
                .enumerate()
                .map(|(n, &h_n)| h_n * Complex64::from_polar(1.0, -omega * n as f64))
                .sum()
        })
        .collect()
}

/// Calculate magnitude response in dB
pub fn magnitude_response_db(h: &[f64], frequencies_hz: &[f64], sample_rate: u32) -> Vec<f64> {
    frequency_response(h, frequencies_hz, sample_rate)
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-12).log10())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_spec() -> LowpassSpec {
        LowpassSpec::new(44100, 1000.0, 64)
    }

    #[test]
    fn test_lowpass_length_and_dc_gain() {
        for order in [64, 65, 129, 255] {
            let h = design_lowpass_fir(&LowpassSpec::new(44100, 1000.0, order)).unwrap();
            assert_eq!(h.len(), order);

            let gain = h.dc_gain();
            assert!((gain - 1.0).abs() < 0.05, "order {}: DC gain {}", order, gain);
        }
    }

    #[test]
    fn test_ideal_kernel_symmetry() {
        // Odd order: the unwindowed kernel is symmetric about the center
        let spec = LowpassSpec::new(44100, 1000.0, 65).with_window(WindowType::Rectangular);
        let h = design_lowpass_fir(&spec).unwrap();
        let h = h.as_slice();

        assert_eq!(spec.center_index(), 32);
        for i in 0..h.len() / 2 {
            let diff = (h[i] - h[h.len() - 1 - i]).abs();
            assert!(
                diff < 1e-12,
                "Not symmetric at index {}: {} vs {}",
                i,
                h[i],
                h[h.len() - 1 - i]
            );
        }
    }

    #[test]
    fn test_even_order_center_tap() {
        let spec = default_spec();
        let h = design_lowpass_fir(&spec).unwrap();
        let center = spec.center_index();
        assert_eq!(center, 31);

        // Center tap is 2*fc scaled by the Hamming value at index 31
        let expected = 2.0 * 1000.0 / 44100.0 * WindowType::Hamming.value(31, 64);
        assert!((h.as_slice()[center] - expected).abs() < 1e-15);

        // Taps around the center mirror each other; index 63 has no partner
        let taps = h.as_slice();
        for k in 1..=30 {
            let left = taps[center - k] / WindowType::Hamming.value(center - k, 64);
            let right = taps[center + k] / WindowType::Hamming.value(center + k, 64);
            assert!((left - right).abs() < 1e-12);
        }
    }

    #[test]
    fn test_design_is_pure() {
        let a = design_lowpass_fir(&default_spec()).unwrap();
        let b = design_lowpass_fir(&default_spec()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stopband_attenuation() {
        let h = design_lowpass_fir(&default_spec()).unwrap();
        let db = magnitude_response_db(h.as_slice(), &[440.0, 3000.0, 10000.0], 44100);

        // 440 Hz passes with modest loss, 3 kHz and above are well attenuated
        assert!(db[0] > -3.0, "passband loss {} dB", db[0]);
        assert!(db[1] < -40.0, "3 kHz only {} dB", db[1]);
        assert!(db[2] < -40.0, "10 kHz only {} dB", db[2]);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert_eq!(
            design_lowpass_fir(&LowpassSpec::new(0, 1000.0, 64)),
            Err(DesignError::NonPositiveSampleRate)
        );
        assert!(matches!(
            design_lowpass_fir(&LowpassSpec::new(44100, 0.0, 64)),
            Err(DesignError::CutoffOutOfRange { .. })
        ));
        assert!(matches!(
            design_lowpass_fir(&LowpassSpec::new(44100, 22050.0, 64)),
            Err(DesignError::CutoffOutOfRange { .. })
        ));
        assert!(matches!(
            design_lowpass_fir(&LowpassSpec::new(44100, f64::NAN, 64)),
            Err(DesignError::CutoffOutOfRange { .. })
        ));
        assert_eq!(
            design_lowpass_fir(&LowpassSpec::new(44100, 1000.0, 1)),
            Err(DesignError::OrderTooSmall(1))
        );
        assert_eq!(
            design_lowpass_fir(&LowpassSpec::new(44100, 1000.0, 0)),
            Err(DesignError::OrderTooSmall(0))
        );
    }

    #[test]
    fn test_empty_taps_rejected() {
        assert_eq!(
            FilterCoefficients::from_taps(Vec::new()),
            Err(DesignError::EmptyCoefficients)
        );
    }
}
