//! Declarative scenarios: base directory + entry specs + load policy.
//!
//! A scenario file is JSON:
//!
//! ```json
//! { "scenarios": [
//!     { "name": "trace", "base_dir": "build", "policy": "best_effort",
//!       "entries": [ { "artifact": "initial" }, { "dumps": "auto" },
//!                    { "artifact": "optimal", "layer": "hullLayer" } ] } ] }
//! ```
//!
//! Resolution expands dump ranges and fills default layers, producing a
//! concrete [`Manifest`].

use crate::artifact::contiguous_dump_count;
use crate::error::{Result, SnapshotError};
use crate::loader::LoadPolicy;
use crate::manifest::{Manifest, ManifestEntry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory the optimizer writes into when run from its build tree.
pub const DEFAULT_BASE_DIR: &str = "build";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoTag {
    Auto,
}

/// How many `dumpN` artifacts to expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DumpCount {
    Fixed(usize),
    /// Count the contiguous run present on disk at resolution time.
    Auto(AutoTag),
}

/// One scenario entry. Exactly one of `artifact` / `dumps` must be present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawEntry")]
pub enum EntrySpec {
    Artifact {
        artifact: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        layer: Option<String>,
    },
    Dumps {
        dumps: DumpCount,
    },
}

/// Wire form of an entry, checked before it becomes an [`EntrySpec`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    artifact: Option<String>,
    layer: Option<String>,
    dumps: Option<DumpCount>,
}

impl TryFrom<RawEntry> for EntrySpec {
    type Error = String;

    fn try_from(raw: RawEntry) -> std::result::Result<Self, Self::Error> {
        match (raw.artifact, raw.layer, raw.dumps) {
            (Some(artifact), layer, None) => Ok(EntrySpec::Artifact { artifact, layer }),
            (None, None, Some(dumps)) => Ok(EntrySpec::Dumps { dumps }),
            (None, Some(_), Some(_)) => {
                Err("dump ranges take no `layer`; dump layers are `dumpN`".to_string())
            }
            (Some(_), _, Some(_)) => {
                Err("entry has both `artifact` and `dumps`; use two entries".to_string())
            }
            (None, _, None) => Err("entry needs `artifact` or `dumps`".to_string()),
        }
    }
}

impl EntrySpec {
    pub fn artifact(name: &str, layer: &str) -> Self {
        EntrySpec::Artifact {
            artifact: name.to_string(),
            layer: Some(layer.to_string()),
        }
    }

    pub fn dumps(k: usize) -> Self {
        EntrySpec::Dumps {
            dumps: DumpCount::Fixed(k),
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_DIR)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    pub entries: Vec<EntrySpec>,
    #[serde(default)]
    pub policy: LoadPolicy,
}

impl Scenario {
    /// Resolve against the scenario's own `base_dir`.
    pub fn resolve(&self) -> Result<Manifest> {
        self.resolve_in(&self.base_dir)
    }

    /// Resolve against `base_dir`; only `"auto"` dump ranges look at disk.
    pub fn resolve_in(&self, base_dir: &Path) -> Result<Manifest> {
        let mut manifest = Manifest::default();
        for spec in &self.entries {
            match spec {
                EntrySpec::Artifact { artifact, layer } => {
                    let entry = match layer {
                        Some(l) => ManifestEntry::new(artifact.as_str(), l.as_str())?,
                        None => ManifestEntry::named(artifact.as_str())?,
                    };
                    manifest.push(entry);
                }
                EntrySpec::Dumps { dumps } => {
                    let k = match dumps {
                        DumpCount::Fixed(k) => *k,
                        DumpCount::Auto(_) => {
                            let k = contiguous_dump_count(base_dir);
                            tracing::debug!(scenario = %self.name, dumps = k, "dump_range_discovered");
                            k
                        }
                    };
                    manifest = manifest.with_dumps(k);
                }
            }
        }
        if manifest.is_empty() {
            return Err(SnapshotError::ManifestEmpty {
                scenario: self.name.clone(),
            });
        }
        Ok(manifest)
    }
}

/// The four usages the display scripts were written for.
pub fn builtin_scenarios() -> Vec<Scenario> {
    let scenario = |name: &str, entries: Vec<EntrySpec>| Scenario {
        name: name.to_string(),
        base_dir: default_base_dir(),
        entries,
        policy: LoadPolicy::FailFast,
    };
    vec![
        scenario(
            "hull",
            vec![
                EntrySpec::artifact("hull", "hullLayer"),
                EntrySpec::artifact("polygon", "polygonLayer"),
                EntrySpec::artifact("points", "pointsLayer"),
            ],
        ),
        scenario(
            "optimized",
            vec![
                EntrySpec::artifact("optimal", "hullLayer"),
                EntrySpec::artifact("initial", "polygonLayer"),
                EntrySpec::artifact("points", "pointsLayer"),
            ],
        ),
        scenario(
            "trace",
            vec![
                EntrySpec::artifact("initial", "initialLayer"),
                EntrySpec::dumps(11),
                EntrySpec::artifact("optimal", "optimalLayer"),
                EntrySpec::artifact("points", "pointsLayer"),
            ],
        ),
        scenario(
            "result",
            vec![
                EntrySpec::artifact("initial", "initialLayer"),
                EntrySpec::artifact("optimal", "optimalLayer"),
                EntrySpec::artifact("points", "pointsLayer"),
            ],
        ),
    ]
}

#[derive(Deserialize)]
struct ScenarioFile {
    scenarios: Vec<Scenario>,
}

/// Named scenario table. Later insertions replace earlier ones by name.
#[derive(Clone, Debug, Default)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn builtin() -> Self {
        Self {
            scenarios: builtin_scenarios(),
        }
    }

    /// Parse a scenario file body; `origin` is only used in error messages.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self> {
        let file: ScenarioFile =
            serde_json::from_str(text).map_err(|e| SnapshotError::Config {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        let mut set = Self::default();
        for s in file.scenarios {
            set.insert(s);
        }
        Ok(set)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| SnapshotError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&text, path)
    }

    /// Built-ins overlaid with the scenarios in `path`.
    pub fn builtin_with_file(path: &Path) -> Result<Self> {
        let mut set = Self::builtin();
        for s in Self::load(path)?.scenarios {
            set.insert(s);
        }
        Ok(set)
    }

    pub fn insert(&mut self, scenario: Scenario) {
        match self.scenarios.iter_mut().find(|s| s.name == scenario.name) {
            Some(slot) => *slot = scenario,
            None => self.scenarios.push(scenario),
        }
    }

    pub fn get(&self, name: &str) -> Result<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SnapshotError::UnknownScenario {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }
}
