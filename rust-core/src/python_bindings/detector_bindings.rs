//! Python bindings for note detection

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::PyReadonlyArray1;
use crate::audio::{NoteProcessor, ProcessorError};
use crate::config::DetectorConfig;
use crate::note::NoteEvent;
use crate::spectrum::SpectrumRange;
use super::filter_bindings::PyWindowType;

fn to_py_err(e: ProcessorError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// `(name, octave)` for a detection, `None` otherwise
fn event_to_py(event: NoteEvent) -> Option<(String, i32)> {
    event
        .note()
        .map(|note| (note.name.as_str().to_string(), note.octave))
}

/// Note detector exposed to Python
///
/// Holds filter state between calls; create one per capture stream.
#[pyclass(name = "NoteDetector")]
pub struct PyNoteDetector {
    processor: NoteProcessor,
}

#[pymethods]
impl PyNoteDetector {
    /// Create a new note detector
    ///
    /// Args:
    ///     sample_rate: Sample rate in Hz of every block
    ///     cutoff_hz: Low-pass cutoff in Hz
    ///     order: Number of FIR taps
    ///     window_type: Window applied before the DFT
    ///     below_nyquist: Search only bins 0..=N/2 for the peak
    #[new]
    #[pyo3(signature = (
        sample_rate=44100,
        cutoff_hz=1000.0,
        order=64,
        window_type=PyWindowType::Rectangular,
        below_nyquist=false
    ))]
    fn new(
        sample_rate: u32,
        cutoff_hz: f64,
        order: usize,
        window_type: PyWindowType,
        below_nyquist: bool,
    ) -> PyResult<Self> {
        let mut config = DetectorConfig {
            sample_rate,
            cutoff_hz,
            filter_order: order,
            ..DetectorConfig::default()
        };
        config.estimator.window_type = window_type.into();
        if below_nyquist {
            config.estimator.range = SpectrumRange::BelowNyquist;
        }

        let processor = NoteProcessor::new(config).map_err(to_py_err)?;
        Ok(Self { processor })
    }

    /// Analyze one block of normalized samples
    ///
    /// Args:
    ///     samples: Samples in [-1, 1] as numpy array (interleaved if channels > 1)
    ///     sample_rate: Sample rate of the block in Hz
    ///     channels: Number of interleaved channels
    ///
    /// Returns:
    ///     (note_name, octave) tuple, or None when no note is detected
    #[pyo3(signature = (samples, sample_rate=44100, channels=1))]
    fn process_block(
        &mut self,
        samples: PyReadonlyArray1<f64>,
        sample_rate: u32,
        channels: u16,
    ) -> PyResult<Option<(String, i32)>> {
        let event = self
            .processor
            .on_audio_block(samples.as_slice()?, sample_rate, channels)
            .map_err(to_py_err)?;

        Ok(event_to_py(event))
    }

    /// Analyze one block of 16-bit little-endian PCM bytes
    #[pyo3(signature = (data, sample_rate=44100, channels=1))]
    fn process_pcm16(
        &mut self,
        data: &[u8],
        sample_rate: u32,
        channels: u16,
    ) -> PyResult<Option<(String, i32)>> {
        let event = self
            .processor
            .on_pcm16_block(data, sample_rate, channels)
            .map_err(to_py_err)?;

        Ok(event_to_py(event))
    }

    /// Clear filter history
    fn reset(&mut self) {
        self.processor.reset();
    }

    /// Get configured sample rate
    fn get_sample_rate(&self) -> u32 {
        self.processor.config().sample_rate
    }
}

/// Map a frequency in Hz to a note label such as "A4", or None
#[pyfunction]
pub fn frequency_to_note(frequency_hz: f64) -> Option<String> {
    crate::note::frequency_to_note(frequency_hz)
        .note()
        .map(|note| note.to_string())
}
