use vr_disturbance::{DisturbanceSet, Pulse};
use vr_results::*;
use vr_sim::{Mode, SimulationConfig, simulate};

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_records() -> (SimulationConfig, Vec<TrajectoryRecord>) {
    let cfg = SimulationConfig::builder().c(50.0).t_end(1.0).build().unwrap();
    let mut set = DisturbanceSet::new().with(Pulse::new(20.0, 0.0, 0.0).unwrap());
    let traj = simulate(&cfg, &mut set).unwrap();
    (cfg, records_from(&traj))
}

#[test]
fn jsonl_roundtrip_preserves_every_record() {
    let dir = temp_dir("vr_results_jsonl");
    let (_, records) = sample_records();
    assert_eq!(records.len(), 100);
    assert_eq!(records[0].mode, Mode::Overvoltage);

    let path = dir.join("run.jsonl");
    write_jsonl(&path, &records).unwrap();
    let loaded = read_jsonl(&path).unwrap();
    assert_same_records(&loaded, &records);
}

// serde_json parses floats best-effort, so allow a last-digit difference.
fn assert_same_records(a: &[TrajectoryRecord], b: &[TrajectoryRecord]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert_eq!(x.mode, y.mode);
        assert!((x.time_s - y.time_s).abs() <= 1e-12 * y.time_s.abs().max(1.0));
        assert!((x.voltage_v - y.voltage_v).abs() <= 1e-12 * y.voltage_v.abs());
    }
}

#[test]
fn csv_roundtrip_preserves_every_record() {
    let dir = temp_dir("vr_results_csv");
    let (_, records) = sample_records();

    let path = dir.join("run.csv");
    write_csv(&path, &records).unwrap();
    let loaded = read_csv(&path).unwrap();
    assert_eq!(loaded, records);
}

#[test]
fn manifest_roundtrip() {
    let dir = temp_dir("vr_results_manifest");
    let (cfg, records) = sample_records();
    let manifest = RunManifest {
        scenario_name: "kick".to_string(),
        parameters: RunParameters::from(&cfg),
        steps: records.len(),
        disturbances: vec!["pulse".to_string()],
        seed: None,
        elapsed_s: 0.002,
    };

    let path = manifest_path_for(&dir.join("run.jsonl"));
    write_manifest(&path, &manifest).unwrap();
    assert_eq!(read_manifest(&path).unwrap(), manifest);
    assert_eq!(manifest.parameters.c, 50.0);
}

#[test]
fn csv_without_header_is_rejected() {
    let dir = temp_dir("vr_results_bad_csv");
    let path = dir.join("bad.csv");
    std::fs::write(&path, "0,220,Normal\n").unwrap();
    assert!(matches!(
        read_csv(&path),
        Err(ResultsError::CsvHeader { ref found }) if found == "0,220,Normal"
    ));
}

// rate * dt = 3: every law overshoots and the voltage blows up to inf/NaN.
fn diverging_records() -> Vec<TrajectoryRecord> {
    let cfg = SimulationConfig::builder()
        .a(300.0)
        .c(300.0)
        .d(300.0)
        .build()
        .unwrap();
    let traj = simulate(&cfg, &mut DisturbanceSet::new()).unwrap();
    records_from(&traj)
}

#[test]
fn jsonl_refuses_diverged_run() {
    let dir = temp_dir("vr_results_jsonl_diverged");
    let records = diverging_records();
    let first_bad = records
        .iter()
        .position(|r| !r.voltage_v.is_finite())
        .expect("run diverges");

    let path = dir.join("run.jsonl");
    match write_jsonl(&path, &records) {
        Err(ResultsError::NonFinite { index, .. }) => assert_eq!(index, first_bad),
        other => panic!("expected non-finite error, got {:?}", other),
    }
    assert!(!path.exists());
}

#[test]
fn csv_keeps_diverged_values() {
    let dir = temp_dir("vr_results_csv_diverged");
    let records = diverging_records();

    let path = dir.join("run.csv");
    write_csv(&path, &records).unwrap();
    let loaded = read_csv(&path).unwrap();
    assert_eq!(loaded.len(), records.len());
    for (got, want) in loaded.iter().zip(&records) {
        assert_eq!(got.mode, want.mode);
        assert_eq!(got.time_s, want.time_s);
        if want.voltage_v.is_nan() {
            assert!(got.voltage_v.is_nan());
        } else {
            assert_eq!(got.voltage_v, want.voltage_v);
        }
    }
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("vr_results_does_not_exist.jsonl");
    assert!(matches!(read_jsonl(&path), Err(ResultsError::Io(_))));
}
