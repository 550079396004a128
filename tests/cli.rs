use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stormtide-ann"))
}

#[test]
fn demo_prints_prediction() {
    let out = bin().arg("demo").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let values: Vec<f64> = stdout.trim()
        .strip_prefix("Prediction: ").unwrap()
        .split(' ').map(|v| v.parse().unwrap()).collect();
    assert_eq!(values.len(), 3);
    assert!((values[0] - 0.528_343_510_7).abs() < 1e-6);
}

#[test]
fn run_reports_summary_and_exit_zero() {
    let dir = TempDir::new().unwrap();
    let files = [
        ("ANNSFM_inputs.csv", "1,2\n3,4\n5,6\n"),
        ("ANNSFM_Config_I.csv", "0,0\n6,6\n"),
        ("ANNSFM_CS_HW.csv", "0.2,0.1\n-0.3,0.4\n"),
        ("ANNSFM_CS_HB.csv", "0.1,0.1\n"),
        ("ANNSFM_CS_OW.csv", "1,-1\n"),
        ("ANNSFM_CS_OB.csv", "0\n"),
    ];
    for (name, body) in files {
        fs::write(dir.path().join(name), body).unwrap();
    }

    let out = bin()
        .args(["run", "--preset", "csv", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("[OK] N=3, F=2, HN=2, OUT=1"));
    assert!(stdout.contains("prediction_validate.csv"));
    assert!(dir.path().join("prediction_validate.csv").exists());
}

#[test]
fn failure_exits_one_with_single_diagnostic() {
    let dir = TempDir::new().unwrap();
    let out = bin()
        .env_remove("RUST_LOG")
        .args(["run", "--preset", "txt", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "{stderr}");
    assert!(lines[0].starts_with("[ERROR]"));
    assert!(lines[0].contains("ANNSFM_inputs.txt"));
}

#[test]
fn failure_after_degenerate_bound_still_prints_one_stderr_line() {
    let dir = TempDir::new().unwrap();
    let files = [
        ("ANNSFM_inputs.csv", "1,3\n2,3\n"),
        ("ANNSFM_Config_I.csv", "0,3\n6,3\n"),
        ("ANNSFM_CS_HW.csv", "0.2,0.1\n-0.3,0.4\n"),
        ("ANNSFM_CS_HB.csv", "0,0\n"),
        ("ANNSFM_CS_OW.csv", "1,-1\n"),
        ("ANNSFM_CS_OB.csv", "0\n"),
    ];
    for (name, body) in files {
        fs::write(dir.path().join(name), body).unwrap();
    }
    // the result path is taken by a directory, so the export fails
    fs::create_dir(dir.path().join("prediction_validate.csv")).unwrap();

    let out = bin()
        .env_remove("RUST_LOG")
        .args(["run", "--preset", "csv", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "{stderr}");
    assert!(lines[0].starts_with("[ERROR]"));
    assert!(lines[0].contains("prediction_validate.csv"));
}

#[test]
fn init_config_round_trips_through_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    let out = bin().arg("init-config").arg(&path).args(["--preset", "csv"]).output().unwrap();
    assert!(out.status.success());

    let cfg = stormtide_ann::PipelineConfig::load_json(&path).unwrap();
    assert_eq!(cfg, stormtide_ann::PipelineConfig::csv());
}
