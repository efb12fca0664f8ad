//! Window functions for FIR coefficient tapering and pre-DFT analysis

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    /// Used to taper the low-pass sinc kernel
    Hamming,

    /// Rectangular window (no windowing)
    #[default]
    Rectangular,
}

impl WindowType {
    /// Window value at index `n` of a window of `length` samples
    ///
    /// A single-sample window is 1.0 for every type so that callers never
    /// divide by `length - 1 == 0`.
    pub fn value(&self, n: usize, length: usize) -> f64 {
        if length < 2 {
            return 1.0;
        }

        let angle = 2.0 * PI * n as f64 / (length as f64 - 1.0);
        match self {
            WindowType::Hann => 0.5 - 0.5 * angle.cos(),
            WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
            WindowType::Rectangular => 1.0,
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    (0..length).map(|n| window_type.value(n, length)).collect()
}
