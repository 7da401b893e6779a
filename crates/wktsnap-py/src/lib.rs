//! PyO3 bindings for `wktsnap`, meant for the QGIS Python console.
//!
//! Notes
//! - Keep bindings thin: Python hands in a base directory plus either plain
//!   artifact names or a scenario name, and a callable such as
//!   `iface.show_wkt` that receives `(wkt, layer)`.
//! - Loading, manifest resolution, and policy live in the `wktsnap` crate.

use pyo3::prelude::*;

mod common;
mod export;
mod snapshot;

#[pymodule]
fn wktsnap_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", wktsnap::VERSION)?;
    snapshot::register(m)?;
    export::register(m)?;
    Ok(())
}
