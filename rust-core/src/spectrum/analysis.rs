//! Dominant-pitch estimation from a block's magnitude spectrum
//!
//! The transform length equals the block length (no zero-padding). The
//! winning bin is converted to Hz with `k * sample_rate / N` and mapped to
//! the nearest equal-tempered note.

use super::fft::{bin_to_hz, FftEngine};
use super::windowing::apply_window_inplace;
use crate::filters::windows::WindowType;
use crate::note::{frequency_to_note, NoteEvent};

/// Relative margin a later bin must exceed the current peak by to win
///
/// Conjugate-mirror bins of a real signal differ only by rounding noise;
/// within this margin the lower bin is kept. Under `SpectrumRange::Full` a
/// bin past N/2 that wins by more than the margin is still reported.
pub const PEAK_TIE_TOLERANCE: f64 = 1e-9;

/// Which bins take part in the peak search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectrumRange {
    /// All N bins of the complex DFT. Bins past N/2 are mirror images and
    /// can produce frequencies above Nyquist if they dominate.
    #[default]
    Full,

    /// Bins 0..=N/2 only, so estimates never exceed Nyquist
    BelowNyquist,
}

/// Spectral pitch estimator configuration
#[derive(Debug, Clone, Default)]
pub struct EstimatorConfig {
    /// Window applied before the DFT (Rectangular = none)
    pub window_type: WindowType,

    /// Bins considered when locating the peak
    pub range: SpectrumRange,
}

/// Index and magnitude of the largest bin
///
/// Ties go to the lowest index. Non-finite magnitudes are skipped and an
/// all-zero spectrum has no dominant bin.
pub fn dominant_bin(magnitudes: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (k, &magnitude) in magnitudes.iter().enumerate() {
        if !magnitude.is_finite() {
            continue;
        }
        let replaces = match best {
            None => true,
            Some((_, peak)) => magnitude > peak * (1.0 + PEAK_TIE_TOLERANCE),
        };
        if replaces {
            best = Some((k, magnitude));
        }
    }

    best.filter(|&(_, peak)| peak > 0.0)
}

/// Single-pitch estimator over filtered audio blocks
pub struct PitchEstimator {
    config: EstimatorConfig,
    fft_engine: FftEngine,

    /// Windowed copy of the block under analysis
    scratch: Vec<f64>,
}

impl PitchEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            fft_engine: FftEngine::new(),
            scratch: Vec::new(),
        }
    }

    /// Magnitude spectrum of `block` over the configured range
    ///
    /// Returns N values for `Full` and N/2 + 1 for `BelowNyquist`.
    pub fn magnitude_spectrum(&mut self, block: &[f64]) -> Vec<f64> {
        let signal: &[f64] = if self.config.window_type == WindowType::Rectangular {
            block
        } else {
            self.scratch.clear();
            self.scratch.extend_from_slice(block);
            apply_window_inplace(&mut self.scratch, self.config.window_type);
            &self.scratch
        };

        match self.config.range {
            SpectrumRange::Full => self.fft_engine.full_magnitudes(signal),
            SpectrumRange::BelowNyquist => match self.fft_engine.positive_magnitudes(signal) {
                Ok(spectrum) => spectrum,
                Err(e) => {
                    log::warn!("Real FFT of {} samples failed: {}", signal.len(), e);
                    Vec::new()
                }
            },
        }
    }

    /// Frequency of the dominant bin in Hz
    ///
    /// `None` for blocks shorter than two samples (a single bin is DC) and
    /// for spectra with no energy.
    pub fn dominant_frequency(&mut self, block: &[f64], sample_rate: u32) -> Option<f64> {
        if block.len() < 2 {
            return None;
        }

        let spectrum = self.magnitude_spectrum(block);
        let (bin, magnitude) = dominant_bin(&spectrum)?;
        let frequency = bin_to_hz(bin, block.len(), sample_rate);

        log::trace!(
            "Dominant bin {} of {} (|X| = {:.3e}) -> {:.2} Hz",
            bin,
            block.len(),
            magnitude,
            frequency
        );

        Some(frequency)
    }

    /// Estimate the note carried by a filtered block
    ///
    /// Empty, silent and DC-dominated blocks give `NoDetection`.
    pub fn estimate(&mut self, block: &[f64], sample_rate: u32) -> NoteEvent {
        self.dominant_frequency(block, sample_rate)
            .map_or(NoteEvent::NoDetection, frequency_to_note)
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }
}

impl Default for PitchEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}
