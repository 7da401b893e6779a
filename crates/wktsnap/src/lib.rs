//! Geometry snapshot exchange over Well-Known-Text files.
//!
//! An optimizer run leaves `<base_dir>/<name>.wkt` files behind (`initial`,
//! `dump1..dumpK`, `optimal`, `points`, …). This crate
//! - writes such snapshot sets (`export`),
//! - resolves declarative scenarios into ordered artifact → layer manifests
//!   (`scenario`, `manifest`),
//! - loads them in manifest order and hands each one to a `LayerSink`
//!   (`loader`, `sink`).
//!
//! WKT content is never parsed on the way in; it is passed through as text.

pub mod artifact;
pub mod error;
pub mod export;
pub mod loader;
pub mod manifest;
pub mod scenario;
pub mod sink;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use artifact::Artifact;
pub use error::{Result, SinkError, SnapshotError};
pub use loader::{display, load_all, load_best_effort, load_each, DisplayReport, LoadPolicy};
pub use manifest::{Manifest, ManifestEntry};
pub use scenario::{Scenario, ScenarioSet};
pub use sink::LayerSink;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::artifact::{artifact_path, contiguous_dump_count, dump_name, Artifact};
    pub use crate::error::{Result, SinkError, SnapshotError};
    pub use crate::export::{multipoint_wkt, polygon_wkt, SnapshotWriter};
    pub use crate::loader::{
        display, load_all, load_best_effort, load_each, load_one, DisplayReport, LoadPolicy,
        LoadReport,
    };
    pub use crate::manifest::{default_layer, Manifest, ManifestEntry};
    pub use crate::scenario::{builtin_scenarios, DumpCount, EntrySpec, Scenario, ScenarioSet};
    pub use crate::sink::{FnSink, LayerCall, LayerSink, RecordingSink};
    pub use nalgebra::Vector2 as Vec2;
}
