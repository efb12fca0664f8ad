//! Python bindings for FIR filter operations

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::filters::{design_lowpass_fir, FilterCoefficients, FirFilter, LowpassSpec, WindowType};

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hann,
    Hamming,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

/// Streaming FIR filter exposed to Python
#[pyclass(name = "FirFilter")]
pub struct PyFirFilter {
    filter: FirFilter,
}

#[pymethods]
impl PyFirFilter {
    /// Create a new FIR filter
    ///
    /// Args:
    ///     coefficients: Filter coefficients as numpy array (non-empty)
    #[new]
    fn new(coefficients: PyReadonlyArray1<f64>) -> PyResult<Self> {
        let coeffs = FilterCoefficients::from_taps(coefficients.as_slice()?.to_vec())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(Self {
            filter: FirFilter::new(coeffs),
        })
    }

    /// Design a windowed-sinc low-pass FIR filter
    ///
    /// Args:
    ///     sample_rate: Sample rate in Hz
    ///     cutoff_hz: Cutoff frequency in Hz, below Nyquist
    ///     order: Number of taps (at least 2)
    ///     window_type: Taper for the sinc kernel
    ///
    /// Returns:
    ///     New FIR filter instance
    #[staticmethod]
    #[pyo3(signature = (
        sample_rate=44100,
        cutoff_hz=1000.0,
        order=64,
        window_type=PyWindowType::Hamming
    ))]
    fn design_lowpass(
        sample_rate: u32,
        cutoff_hz: f64,
        order: usize,
        window_type: PyWindowType,
    ) -> PyResult<Self> {
        let spec = LowpassSpec::new(sample_rate, cutoff_hz, order).with_window(window_type.into());
        let coeffs = design_lowpass_fir(&spec).map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(Self {
            filter: FirFilter::new(coeffs),
        })
    }

    /// Process a block of samples
    ///
    /// Args:
    ///     input_signal: Input samples as numpy array
    ///
    /// Returns:
    ///     Filtered output as numpy array
    fn process_block<'py>(
        &mut self,
        py: Python<'py>,
        input_signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let output = self.filter.process_block(input_signal.as_slice()?);

        Ok(PyArray1::from_vec(py, output))
    }

    /// Reset filter state
    fn reset(&mut self) {
        self.filter.reset();
    }

    /// Get filter coefficients
    fn get_coefficients<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray1<f64>> {
        let coeffs = self.filter.coefficients().as_slice().to_vec();
        Ok(PyArray1::from_vec(py, coeffs))
    }

    /// Get filter length
    fn length(&self) -> usize {
        self.filter.length()
    }

    /// Get group delay in samples
    fn group_delay(&self) -> f64 {
        self.filter.group_delay_samples()
    }
}
