use super::*;
use crate::artifact::dump_name;
use crate::error::SinkError;
use crate::sink::{FnSink, RecordingSink};
use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const SQUARE: &str = "POLYGON((0 0,1 0,1 1,0 1,0 0))";
const CENTER: &str = "MULTIPOINT((0.5 0.5))";

fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, content) in files {
        fs::write(artifact_path(dir.path(), name), content).unwrap();
    }
    dir
}

fn trace_dir(k: usize) -> TempDir {
    let dir = fixture(&[("initial", SQUARE), ("optimal", SQUARE), ("points", CENTER)]);
    for i in 1..=k {
        let wkt = format!("POLYGON((0 0,{i} 0,{i} 1,0 0))");
        fs::write(artifact_path(dir.path(), &dump_name(i)), wkt).unwrap();
    }
    dir
}

#[test]
fn all_present_preserves_order_and_content() {
    let dir = fixture(&[("polygon", SQUARE), ("points", CENTER), ("hull", SQUARE)]);
    let arts = load_all(dir.path(), &["points", "hull", "polygon"]).unwrap();
    let names: Vec<_> = arts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["points", "hull", "polygon"]);
    assert_eq!(arts[0].content, CENTER);
    assert_eq!(arts[1].path, dir.path().join("hull.wkt"));
}

#[test]
fn content_is_not_trimmed_or_parsed() {
    let raw = "not even wkt\n\n";
    let dir = fixture(&[("odd", raw)]);
    let arts = load_all(dir.path(), &["odd"]).unwrap();
    assert_eq!(arts[0].content, raw);
}

#[test]
fn missing_artifact_is_not_found_and_named() {
    let dir = fixture(&[("initial", SQUARE), ("points", CENTER)]);
    let err = load_all(dir.path(), &["initial", "optimal", "points"]).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.artifact(), Some("optimal"));
}

#[test]
fn directory_in_place_of_file_is_unreadable() {
    let dir = tempdir().unwrap();
    fs::create_dir(artifact_path(dir.path(), "hull")).unwrap();
    let err = load_one(dir.path(), "hull").unwrap_err();
    assert!(matches!(err, SnapshotError::ArtifactUnreadable { .. }));
}

#[test]
fn empty_and_non_utf8_files_are_unreadable() {
    let dir = fixture(&[("blank", "  \n")]);
    fs::write(artifact_path(dir.path(), "binary"), [0xff, 0xfe, 0x00]).unwrap();
    for name in ["blank", "binary"] {
        let err = load_one(dir.path(), name).unwrap_err();
        assert!(
            matches!(err, SnapshotError::ArtifactUnreadable { .. }),
            "{name}: {err}"
        );
        assert_eq!(err.artifact(), Some(name));
    }
}

#[test]
fn invalid_name_is_rejected_before_io() {
    let dir = tempdir().unwrap();
    let err = load_one(dir.path(), "../hull").unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidArtifactName { .. }));
}

#[test]
fn loading_twice_is_identical() {
    let dir = trace_dir(4);
    let names = ["initial", "dump1", "dump2", "dump3", "dump4", "optimal"];
    let a = load_all(dir.path(), &names).unwrap();
    let b = load_all(dir.path(), &names).unwrap();
    assert_eq!(a, b);
}

#[test]
fn dump_range_loads_in_ascending_order() {
    let dir = trace_dir(11);
    let names: Vec<String> = (1..=11).map(dump_name).collect();
    let arts = load_all(dir.path(), &names).unwrap();
    assert_eq!(arts.len(), 11);
    for (i, a) in arts.iter().enumerate() {
        assert_eq!(a.name, dump_name(i + 1));
        assert!(a.content.contains(&format!("{} 0", i + 1)));
    }
}

#[test]
fn dump_overrun_fails_on_that_index_only() {
    let dir = trace_dir(11);
    let names: Vec<String> = (1..=12).map(dump_name).collect();
    let err = load_all(dir.path(), &names).unwrap_err();
    assert_eq!(err.artifact(), Some("dump12"));

    let report = load_best_effort(dir.path(), &names);
    assert_eq!(report.loaded.len(), 11);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].artifact(), Some("dump12"));
    assert!(!report.is_complete());
}

#[test]
fn empty_manifest_loads_nothing() {
    let dir = tempdir().unwrap();
    let none: [&str; 0] = [];
    assert!(load_all(dir.path(), &none).unwrap().is_empty());
}

#[test]
fn hull_scenario_end_to_end() {
    let dir = fixture(&[("polygon", SQUARE), ("points", CENTER), ("hull", SQUARE)]);
    let manifest = Manifest::from_names(&["hull", "polygon", "points"]).unwrap();
    let mut sink = RecordingSink::new();
    let report = display(dir.path(), &manifest, LoadPolicy::FailFast, &mut sink).unwrap();
    assert_eq!(sink.layers(), ["hullLayer", "polygonLayer", "pointsLayer"]);
    let wkts: Vec<_> = sink.calls.iter().map(|c| c.wkt.as_str()).collect();
    assert_eq!(wkts, [SQUARE, SQUARE, CENTER]);
    assert_eq!(report.shown.len(), 3);
    assert!(report.failures.is_empty());
}

#[test]
fn fail_fast_makes_no_sink_call_on_missing_artifact() {
    let dir = fixture(&[("initial", SQUARE), ("points", CENTER)]);
    let manifest = Manifest::from_names(&["initial", "optimal", "points"]).unwrap();
    let mut sink = RecordingSink::new();
    let err = display(dir.path(), &manifest, LoadPolicy::FailFast, &mut sink).unwrap_err();
    assert_eq!(err.artifact(), Some("optimal"));
    assert!(err.is_not_found());
    assert!(sink.calls.is_empty());
}

#[test]
fn best_effort_shows_the_rest_and_reports_failure() {
    let dir = fixture(&[("initial", SQUARE), ("points", CENTER)]);
    let manifest = Manifest::from_names(&["initial", "optimal", "points"]).unwrap();
    let mut sink = RecordingSink::new();
    let report = display(dir.path(), &manifest, LoadPolicy::BestEffort, &mut sink).unwrap();
    assert_eq!(sink.layers(), ["initialLayer", "pointsLayer"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].artifact(), Some("optimal"));
    let shown: Vec<_> = report.shown.iter().map(|e| e.artifact.as_str()).collect();
    assert_eq!(shown, ["initial", "points"]);
}

#[test]
fn sink_error_aborts_display() {
    let dir = fixture(&[("initial", SQUARE), ("points", CENTER)]);
    let manifest = Manifest::from_names(&["initial", "points"]).unwrap();
    let mut seen = Vec::new();
    let mut sink = FnSink(|_: &str, layer: &str| {
        seen.push(layer.to_string());
        Err(SinkError::new("host closed"))
    });
    let err = display(dir.path(), &manifest, LoadPolicy::BestEffort, &mut sink).unwrap_err();
    assert!(matches!(err, SnapshotError::Sink { ref layer, .. } if layer == "initialLayer"));
    assert_eq!(seen, ["initialLayer"]);
}

fn write_all(dir: &Path, files: &[(String, String)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(n, c)| {
            let p = artifact_path(dir, n);
            fs::write(&p, c).unwrap();
            p
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn load_all_matches_written_files(
        files in prop::collection::btree_map(
            "[a-z][a-z0-9_]{0,8}",
            "[A-Z]{4,10}\\(\\([0-9 ,.]{1,24}\\)\\)",
            1..8,
        ).prop_map(|m| m.into_iter().collect::<Vec<_>>()).prop_shuffle()
    ) {
        let dir = tempdir().unwrap();
        write_all(dir.path(), &files);
        let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
        let arts = load_all(dir.path(), &names).unwrap();
        prop_assert_eq!(arts.len(), files.len());
        for (a, (n, c)) in arts.iter().zip(&files) {
            prop_assert_eq!(&a.name, n);
            prop_assert_eq!(&a.content, c);
        }
    }
}
