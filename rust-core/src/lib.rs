//! Note Finder - Real-Time Pitch-to-Note DSP Core
//!
//! Low-pass FIR filtering over a streaming delay line, followed by a
//! DFT-based dominant-pitch estimate mapped to an equal-tempered note name.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod audio;
pub mod config;
pub mod filters;
pub mod note;
pub mod spectrum;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use audio::{AudioBlock, NoteProcessor, NoteSink, NoteWorker, ProcessorError};
pub use config::DetectorConfig;
pub use filters::{
    design_lowpass_fir, DesignError, FilterCoefficients, FirFilter, LowpassSpec, WindowType,
};
pub use note::{frequency_to_note, Note, NoteEvent, NoteName};
pub use spectrum::{PitchEstimator, SpectrumRange};
