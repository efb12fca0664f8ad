//! Spectral pitch estimation with FFT

pub mod fft;
pub mod windowing;
pub mod analysis;

pub use fft::{FftEngine, bin_to_hz};
pub use windowing::apply_window_inplace;
pub use analysis::{EstimatorConfig, PitchEstimator, SpectrumRange, dominant_bin};
