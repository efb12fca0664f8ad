//! FFT engine for magnitude spectra of arbitrary-length blocks
//!
//! The full complex transform (rustfft) keeps all N bins, mirror half
//! included. The real transform (realfft) yields only bins 0..=N/2.

use num_complex::Complex;
use realfft::{FftError, RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// FFT engine with cached plans and reusable buffers
///
/// The most recent plan of each kind is kept with its length, so a
/// stream of equal-sized blocks plans only once. Plans are `Send + Sync`,
/// which lets the engine move to a worker thread.
pub struct FftEngine {
    /// Full-length complex transform and its size
    complex_plan: Option<(usize, Arc<dyn Fft<f64>>)>,

    /// Real-input transform and its size
    real_plan: Option<(usize, Arc<dyn RealToComplex<f64>>)>,

    /// Reusable in-place buffer for the complex transform
    complex_buffer: Vec<Complex<f64>>,

    /// Reusable input buffer for the real transform (realfft overwrites it)
    real_input: Vec<f64>,

    /// Reusable output buffer for the real transform
    half_spectrum: Vec<Complex<f64>>,
}

impl FftEngine {
    pub fn new() -> Self {
        Self {
            complex_plan: None,
            real_plan: None,
            complex_buffer: Vec::new(),
            real_input: Vec::new(),
            half_spectrum: Vec::new(),
        }
    }

    fn complex_plan(&mut self, n: usize) -> Arc<dyn Fft<f64>> {
        match &self.complex_plan {
            Some((len, plan)) if *len == n => Arc::clone(plan),
            _ => {
                let plan = FftPlanner::<f64>::new().plan_fft_forward(n);
                self.complex_plan = Some((n, Arc::clone(&plan)));
                plan
            }
        }
    }

    fn real_plan(&mut self, n: usize) -> Arc<dyn RealToComplex<f64>> {
        match &self.real_plan {
            Some((len, plan)) if *len == n => Arc::clone(plan),
            _ => {
                let plan = RealFftPlanner::<f64>::new().plan_fft_forward(n);
                self.real_plan = Some((n, Arc::clone(&plan)));
                plan
            }
        }
    }

    /// Magnitudes of all N bins of the forward DFT
    ///
    /// Each sample is lifted to a complex value with zero imaginary part.
    /// No scaling is applied, so a unit sine at an exact bin peaks at N/2.
    pub fn full_magnitudes(&mut self, signal: &[f64]) -> Vec<f64> {
        if signal.is_empty() {
            return Vec::new();
        }

        let fft = self.complex_plan(signal.len());

        self.complex_buffer.clear();
        self.complex_buffer
            .extend(signal.iter().map(|&x| Complex::new(x, 0.0)));
        fft.process(&mut self.complex_buffer);

        self.complex_buffer.iter().map(|c| c.norm()).collect()
    }

    /// Magnitudes of bins 0..=N/2 of the forward DFT
    pub fn positive_magnitudes(&mut self, signal: &[f64]) -> Result<Vec<f64>, FftError> {
        if signal.is_empty() {
            return Ok(Vec::new());
        }

        let n = signal.len();
        let r2c = self.real_plan(n);

        self.real_input.clear();
        self.real_input.extend_from_slice(signal);
        self.half_spectrum.clear();
        self.half_spectrum.resize(n / 2 + 1, Complex::new(0.0, 0.0));

        r2c.process(&mut self.real_input, &mut self.half_spectrum)?;

        Ok(self.half_spectrum.iter().map(|c| c.norm()).collect())
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Center frequency of `bin` for an `n`-point transform, in Hz
///
/// Valid as a physical frequency only for `bin <= n / 2`; higher bins are
/// mirror images of negative frequencies.
pub fn bin_to_hz(bin: usize, n: usize, sample_rate: u32) -> f64 {
    if n == 0 {
        return 0.0;
    }
    bin as f64 * sample_rate as f64 / n as f64
}
