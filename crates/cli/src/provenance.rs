use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata recorded next to an exported snapshot set.
pub struct Payload {
    pub params: Value,
    pub outputs: Vec<PathBuf>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            outputs: Vec::new(),
        }
    }
}

/// Write `<base_dir>/<label>.provenance.json` with git commit, callsite, params, and outputs.
#[track_caller]
pub fn write_sidecar(base_dir: &Path, label: &str, payload: Payload) -> Result<PathBuf> {
    let path = sidecar_path(base_dir, label);
    if !base_dir.as_os_str().is_empty() {
        fs::create_dir_all(base_dir)
            .with_context(|| format!("creating provenance dir {}", base_dir.display()))?;
    }

    let callsite = Location::caller();
    let outputs: Vec<String> = payload
        .outputs
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": wktsnap::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "outputs": outputs
    });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(base_dir: &Path, label: &str) -> PathBuf {
    let label = if label.is_empty() { "snapshot" } else { label };
    base_dir.join(format!("{}.provenance.json", label))
}

/// Commit of the build: `GIT_COMMIT` at compile or run time, else `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}
