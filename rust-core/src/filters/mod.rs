//! Low-pass FIR design and streaming filtering

pub mod windows;
pub mod design;
pub mod fir;

pub use windows::{WindowType, generate_window};
pub use design::{DesignError, FilterCoefficients, LowpassSpec, design_lowpass_fir};
pub use fir::{DelayLine, FirFilter};
