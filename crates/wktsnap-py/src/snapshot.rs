//! Loader and scenario bindings.

use crate::common::{map_snapshot_err, PySink};
use pyo3::prelude::*;
use std::path::PathBuf;
use wktsnap::{display, load_all as load_all_rs, LoadPolicy, ScenarioSet, SnapshotError};

/// Fail-fast load of `base_dir/<name>.wkt` for each name, as `(name, wkt)` pairs.
#[pyfunction]
pub fn load_all(base_dir: PathBuf, names: Vec<String>) -> PyResult<Vec<(String, String)>> {
    let arts = load_all_rs(&base_dir, &names).map_err(map_snapshot_err)?;
    Ok(arts.into_iter().map(|a| (a.name, a.content)).collect())
}

#[pyfunction]
pub fn builtin_scenarios() -> Vec<String> {
    ScenarioSet::builtin()
        .names()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Resolve a built-in scenario and call `show(wkt, layer)` per artifact.
///
/// Returns the failure messages collected under `best_effort`.
#[pyfunction]
#[pyo3(signature = (scenario, show, base_dir=None, best_effort=false))]
pub fn show_scenario(
    py: Python<'_>,
    scenario: &str,
    show: PyObject,
    base_dir: Option<PathBuf>,
    best_effort: bool,
) -> PyResult<Vec<String>> {
    let set = ScenarioSet::builtin();
    let scenario = set.get(scenario).map_err(map_snapshot_err)?;
    let base_dir = base_dir.unwrap_or_else(|| scenario.base_dir.clone());
    let policy = if best_effort {
        LoadPolicy::BestEffort
    } else {
        scenario.policy
    };
    let manifest = scenario.resolve_in(&base_dir).map_err(map_snapshot_err)?;
    let mut sink = PySink::new(py, &show);
    match display(&base_dir, &manifest, policy, &mut sink) {
        Ok(report) => Ok(report.failures.iter().map(|f| f.to_string()).collect()),
        Err(err @ SnapshotError::Sink { .. }) => Err(sink
            .raised
            .take()
            .unwrap_or_else(|| map_snapshot_err(err))),
        Err(err) => Err(map_snapshot_err(err)),
    }
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(load_all, m)?)?;
    m.add_function(wrap_pyfunction!(builtin_scenarios, m)?)?;
    m.add_function(wrap_pyfunction!(show_scenario, m)?)?;
    Ok(())
}
