use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::Vector2;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use wktsnap::prelude::*;

mod provenance;
mod sinks;

use sinks::{JsonLinesSink, QgisScriptSink, TableSink};

#[derive(Parser)]
#[command(name = "wktsnap")]
#[command(about = "Load, inspect, and export WKT geometry snapshot sets")]
struct Cmd {
    /// JSON scenario file overlaid on the built-in scenarios
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// One JSON object per layer
    Jsonl,
    /// QGIS Python-console script
    Qgis,
}

#[derive(Subcommand)]
enum Action {
    /// Load a scenario and print each layer
    Show {
        #[arg(long)]
        scenario: String,
        /// Overrides the scenario's base directory
        #[arg(long)]
        base_dir: Option<PathBuf>,
        /// Show what loads and report the rest instead of aborting
        #[arg(long)]
        best_effort: bool,
        #[arg(long, value_enum, default_value_t = Format::Jsonl)]
        format: Format,
        /// Also write the layers as a table (.csv or .parquet)
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Print the known scenarios as JSON
    List,
    /// Print the resolved manifest of a scenario with file status
    Report {
        #[arg(long)]
        scenario: String,
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
    /// Write a synthetic snapshot set plus provenance sidecar
    Demo {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 11)]
        dumps: usize,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    let cmd = Cmd::parse();
    let set = scenarios(cmd.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cmd.action {
        Action::Show {
            scenario,
            base_dir,
            best_effort,
            format,
            table,
        } => {
            let opts = ShowOpts {
                base_dir,
                best_effort,
                format,
                table,
            };
            let report = show(&set, &scenario, opts, &mut out)?;
            if !report.failures.is_empty() {
                for f in &report.failures {
                    eprintln!("{}", f);
                }
                bail!("{} artifact(s) could not be loaded", report.failures.len());
            }
            Ok(())
        }
        Action::List => list(&set, &mut out),
        Action::Report { scenario, base_dir } => report(&set, &scenario, base_dir, &mut out),
        Action::Demo { out: dir, dumps } => demo(&dir, dumps).map(|_| ()),
    }
}

fn scenarios(config: Option<&Path>) -> Result<ScenarioSet> {
    match config {
        Some(path) => ScenarioSet::builtin_with_file(path)
            .with_context(|| format!("loading scenarios from {}", path.display())),
        None => Ok(ScenarioSet::builtin()),
    }
}

struct ShowOpts {
    base_dir: Option<PathBuf>,
    best_effort: bool,
    format: Format,
    table: Option<PathBuf>,
}

fn show(set: &ScenarioSet, name: &str, opts: ShowOpts, out: &mut dyn Write) -> Result<DisplayReport> {
    let scenario = set.get(name)?;
    let base_dir = opts.base_dir.unwrap_or_else(|| scenario.base_dir.clone());
    let policy = if opts.best_effort {
        LoadPolicy::BestEffort
    } else {
        scenario.policy
    };
    tracing::info!(scenario = name, base_dir = %base_dir.display(), policy = ?policy, "show");
    let manifest = scenario.resolve_in(&base_dir)?;

    let inner: Box<dyn LayerSink + '_> = match opts.format {
        Format::Jsonl => Box::new(JsonLinesSink::new(&mut *out)),
        Format::Qgis => Box::new(QgisScriptSink::new(&mut *out)),
    };
    let mut sink = TableSink::new(inner);
    let report = display(&base_dir, &manifest, policy, &mut sink)?;
    if let Some(path) = opts.table {
        sinks::write_table(sink.rows(), &path)?;
    }
    Ok(report)
}

fn list(set: &ScenarioSet, out: &mut dyn Write) -> Result<()> {
    let all: Vec<&Scenario> = set.iter().collect();
    writeln!(out, "{}", serde_json::to_string_pretty(&all)?)?;
    Ok(())
}

fn report(set: &ScenarioSet, name: &str, base_dir: Option<PathBuf>, out: &mut dyn Write) -> Result<()> {
    let scenario = set.get(name)?;
    let base_dir = base_dir.unwrap_or_else(|| scenario.base_dir.clone());
    let manifest = scenario.resolve_in(&base_dir)?;
    let entries: Vec<_> = manifest
        .iter()
        .map(|e| {
            let path = artifact_path(&base_dir, &e.artifact);
            serde_json::json!({
                "artifact": e.artifact,
                "layer": e.layer,
                "path": path.to_string_lossy(),
                "exists": path.is_file(),
            })
        })
        .collect();
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "scenario": scenario.name,
        "base_dir": base_dir.to_string_lossy(),
        "policy": scenario.policy,
        "dumps": manifest.dump_indices().len(),
        "entries": entries,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&obj)?)?;
    Ok(())
}

/// Points of the demo set: square corners plus one inner point per side.
fn demo_points() -> Vec<Vector2<f64>> {
    vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(4.0, 0.0),
        Vector2::new(4.0, 4.0),
        Vector2::new(0.0, 4.0),
        Vector2::new(2.0, 1.0),
        Vector2::new(3.0, 2.0),
        Vector2::new(2.0, 3.0),
        Vector2::new(1.0, 2.0),
    ]
}

/// Star polygon through `points`, ordered by angle around their centroid.
fn star_polygon(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let n = points.len().max(1) as f64;
    let c = points.iter().fold(Vector2::<f64>::zeros(), |acc, p| acc + p) / n;
    let mut ordered = points.to_vec();
    ordered.sort_by(|a, b| {
        let ta = (a.y - c.y).atan2(a.x - c.x);
        let tb = (b.y - c.y).atan2(b.x - c.x);
        ta.total_cmp(&tb)
    });
    ordered
}

fn lerp(a: &[Vector2<f64>], b: &[Vector2<f64>], t: f64) -> Vec<Vector2<f64>> {
    a.iter().zip(b).map(|(p, q)| p + (q - p) * t).collect()
}

fn demo(dir: &Path, dumps: usize) -> Result<Vec<String>> {
    tracing::info!(out = %dir.display(), dumps, "demo");
    let points = demo_points();
    let hull = points[..4].to_vec();
    let initial = star_polygon(&points);
    let centroid = Vector2::new(2.0, 2.0);
    // Inner vertices pulled halfway to the centroid; corners stay.
    let optimal: Vec<_> = initial
        .iter()
        .map(|p| if hull.contains(p) { *p } else { p + (centroid - p) * 0.5 })
        .collect();

    let mut w = SnapshotWriter::create(dir)?;
    w.write_points("points", &points)?;
    w.write_polygon("polygon", &initial)?;
    w.write_polygon("hull", &hull)?;
    w.write_polygon("initial", &initial)?;
    for k in 1..=dumps {
        let t = k as f64 / (dumps + 1) as f64;
        w.dump_polygon(&lerp(&initial, &optimal, t))?;
    }
    w.write_polygon("optimal", &optimal)?;

    let mut payload = provenance::Payload::new(serde_json::json!({
        "generator": "demo",
        "dumps": dumps,
        "points": points.len(),
    }));
    payload.outputs = w.paths();
    let sidecar = provenance::write_sidecar(dir, "snapshot", payload)?;
    tracing::info!(artifacts = w.written().len(), sidecar = %sidecar.display(), "demo_written");
    Ok(w.written().to_vec())
}
