//! Error taxonomy shared by the loader, manifest resolution, and exporter.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure reported by a [`crate::sink::LayerSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SinkError {}

#[derive(Debug)]
pub enum SnapshotError {
    /// `<base_dir>/<name>.wkt` does not exist.
    ArtifactNotFound { name: String, path: PathBuf },
    /// The file exists but could not be read as non-empty text.
    ArtifactUnreadable {
        name: String,
        path: PathBuf,
        source: io::Error,
    },
    /// A scenario resolved to zero artifacts.
    ManifestEmpty { scenario: String },
    /// Artifact names are file stems: non-empty, no separators, no `..`.
    InvalidArtifactName { name: String },
    UnknownScenario { name: String, available: Vec<String> },
    /// Scenario file could not be read or decoded.
    Config { path: PathBuf, message: String },
    /// Exporter could not write an artifact.
    Write { path: PathBuf, source: io::Error },
    /// The sink rejected a layer; always aborts the display pass.
    Sink { layer: String, source: SinkError },
}

impl SnapshotError {
    /// Artifact name the error is attributable to, if any.
    pub fn artifact(&self) -> Option<&str> {
        match self {
            SnapshotError::ArtifactNotFound { name, .. }
            | SnapshotError::ArtifactUnreadable { name, .. }
            | SnapshotError::InvalidArtifactName { name } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SnapshotError::ArtifactNotFound { .. })
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::ArtifactNotFound { name, path } => {
                write!(f, "artifact '{}' not found at {}", name, path.display())
            }
            SnapshotError::ArtifactUnreadable { name, path, source } => write!(
                f,
                "artifact '{}' at {} is unreadable: {}",
                name,
                path.display(),
                source
            ),
            SnapshotError::ManifestEmpty { scenario } => {
                write!(f, "scenario '{}' resolves to an empty manifest", scenario)
            }
            SnapshotError::InvalidArtifactName { name } => {
                write!(f, "invalid artifact name {:?}", name)
            }
            SnapshotError::UnknownScenario { name, available } => write!(
                f,
                "unknown scenario '{}' (available: {})",
                name,
                available.join(", ")
            ),
            SnapshotError::Config { path, message } => {
                write!(f, "scenario config {}: {}", path.display(), message)
            }
            SnapshotError::Write { path, source } => {
                write!(f, "writing {}: {}", path.display(), source)
            }
            SnapshotError::Sink { layer, source } => {
                write!(f, "sink rejected layer '{}': {}", layer, source)
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::ArtifactUnreadable { source, .. } => Some(source),
            SnapshotError::Write { source, .. } => Some(source),
            SnapshotError::Sink { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
