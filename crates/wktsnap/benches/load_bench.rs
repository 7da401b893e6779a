//! Criterion benchmarks for loading and displaying a trace snapshot set.
//! Focus sizes: dumps in {0, 11, 100}.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector2;
use tempfile::TempDir;
use wktsnap::prelude::*;

fn ring(n: usize, r: f64) -> Vec<Vector2<f64>> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            Vector2::new(r * t.cos(), r * t.sin())
        })
        .collect()
}

fn trace_set(dumps: usize) -> (TempDir, Manifest) {
    let dir = tempfile::tempdir().unwrap();
    let mut w = SnapshotWriter::create(dir.path()).unwrap();
    w.write_polygon("initial", &ring(200, 1.0)).unwrap();
    for k in 0..dumps {
        w.dump_polygon(&ring(200, 1.0 + k as f64 * 0.01)).unwrap();
    }
    w.write_polygon("optimal", &ring(200, 2.0)).unwrap();
    w.write_points("points", &ring(200, 1.5)).unwrap();
    let manifest = Scenario {
        name: "bench".into(),
        base_dir: dir.path().to_path_buf(),
        entries: vec![
            EntrySpec::artifact("initial", "initialLayer"),
            EntrySpec::dumps(dumps),
            EntrySpec::artifact("optimal", "optimalLayer"),
            EntrySpec::artifact("points", "pointsLayer"),
        ],
        policy: LoadPolicy::FailFast,
    }
    .resolve()
    .unwrap();
    (dir, manifest)
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    for &k in &[0usize, 11, 100] {
        let (dir, manifest) = trace_set(k);
        group.bench_with_input(BenchmarkId::new("load_all", k), &k, |b, _| {
            b.iter(|| load_all(dir.path(), &manifest.names()).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("display_recording", k), &k, |b, _| {
            b.iter(|| {
                let mut sink = RecordingSink::new();
                display(dir.path(), &manifest, LoadPolicy::FailFast, &mut sink).unwrap();
                sink.calls.len()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load);
criterion_main!(benches);
