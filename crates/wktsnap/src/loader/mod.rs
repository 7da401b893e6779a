//! Snapshot loader: read `<base_dir>/<name>.wkt` in manifest order.
//!
//! Policy
//! - `FailFast` (default): the first missing/unreadable artifact aborts the
//!   whole load. `display` loads everything before the first sink call, so a
//!   failure means the sink is never touched.
//! - `BestEffort`: every artifact is attempted; failures are collected and
//!   returned next to the artifacts that did load.
//!
//! Content is passed through opaquely. Each file is read exactly once per call
//! and never written.

use crate::artifact::{artifact_path, validate_name, Artifact};
use crate::error::{Result, SnapshotError};
use crate::manifest::{Manifest, ManifestEntry};
use crate::sink::LayerSink;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    #[default]
    FailFast,
    BestEffort,
}

/// Read one artifact. Empty or whitespace-only files count as unreadable.
pub fn load_one(base_dir: &Path, name: &str) -> Result<Artifact> {
    validate_name(name)?;
    let path = artifact_path(base_dir, name);
    match fs::read_to_string(&path) {
        Ok(content) if content.trim().is_empty() => Err(SnapshotError::ArtifactUnreadable {
            name: name.to_string(),
            path,
            source: io::Error::new(io::ErrorKind::InvalidData, "artifact is empty"),
        }),
        Ok(content) => {
            tracing::debug!(artifact = name, bytes = content.len(), "artifact_read");
            Ok(Artifact {
                name: name.to_string(),
                path,
                content,
            })
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(SnapshotError::ArtifactNotFound {
                name: name.to_string(),
                path,
            })
        }
        Err(source) => Err(SnapshotError::ArtifactUnreadable {
            name: name.to_string(),
            path,
            source,
        }),
    }
}

/// Fail-fast load. Output order equals `names` order.
pub fn load_all<S: AsRef<str>>(base_dir: &Path, names: &[S]) -> Result<Vec<Artifact>> {
    if names.is_empty() {
        tracing::warn!(base_dir = %base_dir.display(), "load_all called with an empty manifest");
    }
    names
        .iter()
        .map(|n| load_one(base_dir, n.as_ref()))
        .collect()
}

/// One result per name, same order; never short-circuits.
pub fn load_each<S: AsRef<str>>(base_dir: &Path, names: &[S]) -> Vec<Result<Artifact>> {
    names
        .iter()
        .map(|n| load_one(base_dir, n.as_ref()))
        .collect()
}

/// Outcome of a best-effort load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<Artifact>,
    pub failures: Vec<SnapshotError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn load_best_effort<S: AsRef<str>>(base_dir: &Path, names: &[S]) -> LoadReport {
    let mut report = LoadReport::default();
    for res in load_each(base_dir, names) {
        match res {
            Ok(a) => report.loaded.push(a),
            Err(e) => {
                tracing::warn!(error = %e, "artifact_skipped");
                report.failures.push(e);
            }
        }
    }
    report
}

/// Result of pushing a manifest through a sink.
#[derive(Debug, Default)]
pub struct DisplayReport {
    /// Entries handed to the sink, in call order.
    pub shown: Vec<ManifestEntry>,
    /// Per-artifact failures (best-effort only; fail-fast returns `Err`).
    pub failures: Vec<SnapshotError>,
}

/// Load `manifest` from `base_dir` and call `sink.show_wkt` once per artifact.
///
/// Sink errors abort under either policy.
pub fn display<S: LayerSink + ?Sized>(
    base_dir: &Path,
    manifest: &Manifest,
    policy: LoadPolicy,
    sink: &mut S,
) -> Result<DisplayReport> {
    let names = manifest.names();
    let mut report = DisplayReport::default();
    match policy {
        LoadPolicy::FailFast => {
            let artifacts = load_all(base_dir, &names)?;
            for (entry, artifact) in manifest.iter().zip(artifacts) {
                show(sink, entry, &artifact)?;
                report.shown.push(entry.clone());
            }
        }
        LoadPolicy::BestEffort => {
            for (entry, res) in manifest.iter().zip(load_each(base_dir, &names)) {
                match res {
                    Ok(artifact) => {
                        show(sink, entry, &artifact)?;
                        report.shown.push(entry.clone());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, layer = %entry.layer, "layer_skipped");
                        report.failures.push(e);
                    }
                }
            }
        }
    }
    tracing::info!(
        base_dir = %base_dir.display(),
        shown = report.shown.len(),
        failed = report.failures.len(),
        "display"
    );
    Ok(report)
}

fn show<S: LayerSink + ?Sized>(sink: &mut S, entry: &ManifestEntry, artifact: &Artifact) -> Result<()> {
    sink.show_wkt(&artifact.content, &entry.layer)
        .map_err(|source| SnapshotError::Sink {
            layer: entry.layer.clone(),
            source,
        })
}

#[cfg(test)]
mod tests;
