//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod filter_bindings;
mod detector_bindings;

/// Python module definition
#[pymodule]
fn note_finder(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<filter_bindings::PyFirFilter>()?;
    m.add_class::<detector_bindings::PyNoteDetector>()?;
    m.add_class::<filter_bindings::PyWindowType>()?;
    m.add_function(wrap_pyfunction!(detector_bindings::frequency_to_note, m)?)?;

    Ok(())
}
