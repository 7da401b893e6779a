//! Exporter bindings, for writing snapshots from Python-side experiments.

use crate::common::map_snapshot_err;
use nalgebra::Vector2;
use pyo3::prelude::*;
use std::path::PathBuf;
use wktsnap::export::{multipoint_wkt, polygon_wkt, SnapshotWriter};

fn to_vecs(points: Vec<(f64, f64)>) -> Vec<Vector2<f64>> {
    points.into_iter().map(|(x, y)| Vector2::new(x, y)).collect()
}

#[pyfunction]
pub fn polygon_to_wkt(vertices: Vec<(f64, f64)>) -> String {
    polygon_wkt(&to_vecs(vertices))
}

#[pyfunction]
pub fn points_to_wkt(points: Vec<(f64, f64)>) -> String {
    multipoint_wkt(&to_vecs(points))
}

/// Write `polygons` as `dump1..dumpK` under `base_dir`; returns the paths.
#[pyfunction]
pub fn write_dumps(base_dir: PathBuf, polygons: Vec<Vec<(f64, f64)>>) -> PyResult<Vec<PathBuf>> {
    let mut w = SnapshotWriter::create(base_dir).map_err(map_snapshot_err)?;
    polygons
        .into_iter()
        .map(|p| w.dump_polygon(&to_vecs(p)).map_err(map_snapshot_err))
        .collect()
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(polygon_to_wkt, m)?)?;
    m.add_function(wrap_pyfunction!(points_to_wkt, m)?)?;
    m.add_function(wrap_pyfunction!(write_dumps, m)?)?;
    Ok(())
}
