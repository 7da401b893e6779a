//! Named geometry snapshots and the `<base_dir>/<name>.wkt` path convention.

use crate::error::{Result, SnapshotError};
use std::path::{Path, PathBuf};

/// File extension of every artifact.
pub const WKT_EXT: &str = "wkt";

/// One loaded snapshot. `content` is the file text, untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

/// `base_dir/<name>.wkt`.
pub fn artifact_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir.join(format!("{}.{}", name, WKT_EXT))
}

/// Reject names that would escape `base_dir` or produce odd file names.
pub fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name.trim() != name
        || name == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if bad {
        return Err(SnapshotError::InvalidArtifactName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Name of the `index`-th intermediate snapshot (1-based).
pub fn dump_name(index: usize) -> String {
    format!("dump{}", index)
}

/// Inverse of [`dump_name`]; `None` for non-dump names and `dump0`.
pub fn parse_dump_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix("dump")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || digits.starts_with('0')
    {
        return None;
    }
    digits.parse().ok()
}

/// Length of the contiguous run `dump1, dump2, …` present under `base_dir`.
pub fn contiguous_dump_count(base_dir: &Path) -> usize {
    let mut k = 0;
    while artifact_path(base_dir, &dump_name(k + 1)).is_file() {
        k += 1;
    }
    k
}
