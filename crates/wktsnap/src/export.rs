//! Writer half of the exchange: format polygons / point sets as WKT and drop
//! them into a snapshot directory under the loader's naming convention.
//!
//! Model
//! - Polygons are written as a single closed outer ring, `POLYGON((x y,…))`.
//!   The first vertex is repeated at the end unless the input already closes.
//! - Point sets are written as `MULTIPOINT((x y),…)`.
//! - Coordinates use Rust's shortest round-trip `f64` formatting, so integral
//!   inputs print without a fractional part (`1`, not `1.0`).
//! - `dump_polygon` numbers snapshots `dump1, dump2, …` with no gaps.

use crate::artifact::{artifact_path, dump_name, validate_name};
use crate::error::{Result, SnapshotError};
use nalgebra::Vector2;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

fn push_coord(out: &mut String, p: &Vector2<f64>) {
    let _ = write!(out, "{} {}", p.x, p.y);
}

/// `POLYGON((x0 y0,x1 y1,…,x0 y0))`, or `POLYGON EMPTY`.
pub fn polygon_wkt(vertices: &[Vector2<f64>]) -> String {
    let Some(first) = vertices.first() else {
        return "POLYGON EMPTY".to_string();
    };
    let mut out = String::from("POLYGON((");
    for (i, v) in vertices.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_coord(&mut out, v);
    }
    let closed = vertices.len() > 1 && vertices.last() == Some(first);
    if !closed {
        out.push(',');
        push_coord(&mut out, first);
    }
    out.push_str("))");
    out
}

/// `MULTIPOINT((x y),(x y))`, or `MULTIPOINT EMPTY`.
pub fn multipoint_wkt(points: &[Vector2<f64>]) -> String {
    if points.is_empty() {
        return "MULTIPOINT EMPTY".to_string();
    }
    let mut out = String::from("MULTIPOINT(");
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('(');
        push_coord(&mut out, p);
        out.push(')');
    }
    out.push(')');
    out
}

/// Writes artifacts into one snapshot directory and remembers what it wrote.
#[derive(Debug)]
pub struct SnapshotWriter {
    base_dir: PathBuf,
    written: Vec<String>,
    dumps: usize,
}

impl SnapshotWriter {
    /// Create `base_dir` (and parents) if needed.
    pub fn create(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| SnapshotError::Write {
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self {
            base_dir,
            written: Vec::new(),
            dumps: 0,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write raw WKT text as `<name>.wkt`, with a trailing newline.
    pub fn write_wkt(&mut self, name: &str, wkt: &str) -> Result<PathBuf> {
        validate_name(name)?;
        let path = artifact_path(&self.base_dir, name);
        let mut body = wkt.to_string();
        if !body.ends_with('\n') {
            body.push('\n');
        }
        fs::write(&path, body).map_err(|source| SnapshotError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(artifact = name, path = %path.display(), "artifact_written");
        if !self.written.iter().any(|w| w == name) {
            self.written.push(name.to_string());
        }
        Ok(path)
    }

    pub fn write_polygon(&mut self, name: &str, vertices: &[Vector2<f64>]) -> Result<PathBuf> {
        self.write_wkt(name, &polygon_wkt(vertices))
    }

    pub fn write_points(&mut self, name: &str, points: &[Vector2<f64>]) -> Result<PathBuf> {
        self.write_wkt(name, &multipoint_wkt(points))
    }

    /// Write the next intermediate snapshot (`dump1`, `dump2`, …).
    pub fn dump_polygon(&mut self, vertices: &[Vector2<f64>]) -> Result<PathBuf> {
        let name = dump_name(self.dumps + 1);
        let path = self.write_polygon(&name, vertices)?;
        self.dumps += 1;
        Ok(path)
    }

    pub fn dump_count(&self) -> usize {
        self.dumps
    }

    /// Artifact names in first-write order.
    pub fn written(&self) -> &[String] {
        &self.written
    }

    /// Paths of everything written so far.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.written
            .iter()
            .map(|n| artifact_path(&self.base_dir, n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::contiguous_dump_count;
    use crate::loader::load_all;
    use nalgebra::vector;
    use tempfile::tempdir;

    fn unit_square() -> Vec<Vector2<f64>> {
        vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ]
    }

    #[test]
    fn polygon_ring_is_closed_once() {
        let open = unit_square();
        assert_eq!(polygon_wkt(&open), "POLYGON((0 0,1 0,1 1,0 1,0 0))");
        let mut closed = open.clone();
        closed.push(open[0]);
        assert_eq!(polygon_wkt(&closed), polygon_wkt(&open));
        assert_eq!(polygon_wkt(&[]), "POLYGON EMPTY");
    }

    #[test]
    fn multipoint_formatting() {
        assert_eq!(
            multipoint_wkt(&[vector![0.5, 0.5], vector![-2.0, 3.25]]),
            "MULTIPOINT((0.5 0.5),(-2 3.25))"
        );
        assert_eq!(multipoint_wkt(&[]), "MULTIPOINT EMPTY");
    }

    #[test]
    fn dumps_are_contiguous_and_loadable() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("nested/build");
        let mut w = SnapshotWriter::create(&base).unwrap();
        w.write_points("points", &[vector![0.5, 0.5]]).unwrap();
        for _ in 0..3 {
            w.dump_polygon(&unit_square()).unwrap();
        }
        assert_eq!(w.dump_count(), 3);
        assert_eq!(contiguous_dump_count(&base), 3);
        assert_eq!(w.written(), ["points", "dump1", "dump2", "dump3"]);

        let arts = load_all(&base, w.written()).unwrap();
        assert_eq!(arts[0].content, "MULTIPOINT((0.5 0.5))\n");
        assert_eq!(arts[3].content, "POLYGON((0 0,1 0,1 1,0 1,0 0))\n");
    }

    #[test]
    fn rewrite_does_not_duplicate_names() {
        let dir = tempdir().unwrap();
        let mut w = SnapshotWriter::create(dir.path()).unwrap();
        w.write_wkt("hull", "POINT(0 0)").unwrap();
        w.write_wkt("hull", "POINT(1 1)\n").unwrap();
        assert_eq!(w.written(), ["hull"]);
        assert_eq!(w.paths(), [dir.path().join("hull.wkt")]);
        assert!(w.write_wkt("../x", "POINT(0 0)").is_err());
    }
}
