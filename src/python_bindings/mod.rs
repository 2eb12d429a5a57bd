//! Python bindings for the reuse-distance analyzer.

use pyo3::{
    exceptions::{PyMemoryError, PyValueError},
    prelude::*,
    types::PyModule,
};

use crate::{AnalysisError, ReuseAnalyzer};

/// Python-facing reuse-distance analyzer.
#[pyclass(name = "ReuseAnalyzer")]
#[derive(Debug)]
pub struct PyReuseAnalyzer {
    inner: ReuseAnalyzer,
}

#[pymethods]
impl PyReuseAnalyzer {
    #[new]
    #[pyo3(signature = (size_hint = 0))]
    /// Create an analyzer.
    ///
    /// Args:
    ///     size_hint: Expected number of distinct keys; only 0 ("unknown")
    ///         is supported and anything else raises ValueError.
    pub fn new(size_hint: usize) -> PyResult<Self> {
        let inner = ReuseAnalyzer::with_size_hint(size_hint).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Observe one access and return its reuse distance.
    ///
    /// Args:
    ///     key: Access key.
    ///
    /// Returns:
    ///     The number of distinct other keys referenced since this key's
    ///     previous access, or -1 for a first reference.
    pub fn record(&mut self, key: u64) -> PyResult<i64> {
        let distance = self.inner.record(key).map_err(to_py_err)?;
        Ok(distance.as_i64())
    }

    /// Forget every tracked key and restart the logical clock.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Number of distinct keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.inner.tracked_keys()
    }

    /// Accesses observed since construction or the last reset.
    pub fn accesses(&self) -> u64 {
        self.inner.accesses()
    }
}

fn to_py_err(err: AnalysisError) -> PyErr {
    match err {
        AnalysisError::InvalidSizeHint(_) => PyValueError::new_err(err.to_string()),
        AnalysisError::OutOfMemory(_) => PyMemoryError::new_err(err.to_string()),
    }
}

/// Create Python module.
#[pymodule]
pub fn stackdist_py(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyReuseAnalyzer>()?;
    Ok(())
}
