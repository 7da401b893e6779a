use pyo3::exceptions::{PyFileNotFoundError, PyKeyError, PyOSError, PyValueError};
use pyo3::prelude::*;
use wktsnap::{LayerSink, SinkError, SnapshotError};

pub fn map_snapshot_err(err: SnapshotError) -> PyErr {
    let msg = err.to_string();
    match err {
        SnapshotError::ArtifactNotFound { .. } => PyFileNotFoundError::new_err(msg),
        SnapshotError::ArtifactUnreadable { .. } | SnapshotError::Write { .. } => {
            PyOSError::new_err(msg)
        }
        SnapshotError::UnknownScenario { .. } => PyKeyError::new_err(msg),
        _ => PyValueError::new_err(msg),
    }
}

/// Sink calling a Python callable as `show(wkt, layer)`.
///
/// The first Python exception is kept so it can be re-raised unchanged.
pub struct PySink<'py> {
    py: Python<'py>,
    show: &'py PyObject,
    pub raised: Option<PyErr>,
}

impl<'py> PySink<'py> {
    pub fn new(py: Python<'py>, show: &'py PyObject) -> Self {
        Self {
            py,
            show,
            raised: None,
        }
    }
}

impl LayerSink for PySink<'_> {
    fn show_wkt(&mut self, wkt: &str, layer: &str) -> Result<(), SinkError> {
        match self.show.call1(self.py, (wkt, layer)) {
            Ok(_) => Ok(()),
            Err(err) => {
                let msg = err.to_string();
                self.raised.get_or_insert(err);
                Err(SinkError::new(msg))
            }
        }
    }
}
