//! Ordered artifact → layer tables.
//!
//! Layer names are explicit per entry. The observed convention is
//! `<name>Layer` for single artifacts and the bare `dumpN` for trace
//! snapshots; [`default_layer`] and [`Manifest::with_dumps`] encode it, but
//! any entry may carry its own layer.

use crate::artifact::{dump_name, parse_dump_index, validate_name};
use crate::error::Result;

/// Suffix appended to single-artifact layer names when none is given.
pub const LAYER_SUFFIX: &str = "Layer";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    /// File stem under the base directory.
    pub artifact: String,
    /// Display layer handed to the sink.
    pub layer: String,
}

impl ManifestEntry {
    pub fn new(artifact: impl Into<String>, layer: impl Into<String>) -> Result<Self> {
        let artifact = artifact.into();
        validate_name(&artifact)?;
        Ok(Self {
            artifact,
            layer: layer.into(),
        })
    }

    /// Entry using [`default_layer`].
    pub fn named(artifact: impl Into<String>) -> Result<Self> {
        let artifact = artifact.into();
        let layer = default_layer(&artifact);
        Self::new(artifact, layer)
    }

    pub fn dump(index: usize) -> Self {
        let name = dump_name(index);
        Self {
            artifact: name.clone(),
            layer: name,
        }
    }
}

/// `hull` → `hullLayer`.
pub fn default_layer(artifact: &str) -> String {
    format!("{}{}", artifact, LAYER_SUFFIX)
}

/// Ordered list of entries; order is the load and display order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Manifest of plain names with default layers.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let entries = names
            .iter()
            .map(|n| ManifestEntry::named(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Append `dump1..=dumpK`.
    pub fn with_dumps(mut self, k: usize) -> Self {
        self.entries.extend((1..=k).map(ManifestEntry::dump));
        self
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.artifact.as_str()).collect()
    }

    /// Layer for `artifact`, first match in manifest order.
    pub fn layer_of(&self, artifact: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.artifact == artifact)
            .map(|e| e.layer.as_str())
    }

    /// Indices of the `dumpN` entries, in manifest order.
    pub fn dump_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter_map(|e| parse_dump_index(&e.artifact))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
