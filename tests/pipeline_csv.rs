use std::fs;
use std::path::Path;

use stormtide_ann::{run, AnnError, PipelineConfig};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

fn csv_model() -> (TempDir, PipelineConfig) {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ANNSFM_inputs.csv", "1.0, 2.0, 3.0\n\n0.5,0.5,0.5\n");
    // identity bounds keep the inputs as they are
    write(dir.path(), "ANNSFM_Config_I.csv", "-1,-1,-1\n1,1,1\n");
    write(dir.path(), "ANNSFM_CS_HW.csv", "0.1,0.2,0.3\n0.4,0.5,0.6\n0.7,0.8,0.9\n");
    write(dir.path(), "ANNSFM_CS_HB.csv", "0\n0\n0\n");
    write(dir.path(), "ANNSFM_CS_OW.csv", "0.1,0.2,0.3\n");
    write(dir.path(), "ANNSFM_CS_OB.csv", "0\n");

    let mut cfg = PipelineConfig::csv();
    cfg.files = cfg.files.relative_to(dir.path());
    (dir, cfg)
}

#[test]
fn dimensions_come_from_the_files() {
    let (dir, cfg) = csv_model();
    let report = run(&cfg).unwrap();
    assert_eq!((report.samples, report.features, report.hidden, report.outputs), (2, 3, 3, 1));
    assert_eq!(report.output_path, dir.path().join("prediction_validate.csv"));

    let text = fs::read_to_string(&report.output_path).unwrap();
    let first: Vec<f64> = text.lines().nth(1).unwrap()
        .split(',').map(|c| c.parse().unwrap()).collect();

    // hidden pre-activations for [1, 2, 3] are [1.4, 3.2, 5.0]; no output activation
    let h = [1.4f64.tanh(), 3.2f64.tanh(), 5.0f64.tanh()];
    let expected = 0.1 * h[0] + 0.2 * h[1] + 0.3 * h[2];
    assert!((first[1] - expected).abs() < 1e-6);
}

#[test]
fn row_bias_layout_is_accepted() {
    let (dir, cfg) = csv_model();
    write(dir.path(), "ANNSFM_CS_HB.csv", "0,0,0\n");
    assert_eq!(run(&cfg).unwrap().hidden, 3);
}

#[test]
fn ragged_inputs_name_the_row() {
    let (dir, cfg) = csv_model();
    write(dir.path(), "ANNSFM_inputs.csv", "1,2,3\n4,5\n");
    assert!(matches!(
        run(&cfg),
        Err(AnnError::ColumnMismatch { row: 2, expected: 3, actual: 2, .. })
    ));
}

#[test]
fn bounds_must_be_two_by_features() {
    let (dir, cfg) = csv_model();
    write(dir.path(), "ANNSFM_Config_I.csv", "-1,-1\n1,1\n");
    assert!(matches!(
        run(&cfg),
        Err(AnnError::SizeMismatch { expected: 6, actual: 4, .. })
    ));
}

#[test]
fn hidden_weight_width_must_match_features() {
    let (dir, cfg) = csv_model();
    write(dir.path(), "ANNSFM_CS_HW.csv", "0.1,0.2\n0.4,0.5\n0.7,0.8\n");
    assert!(matches!(
        run(&cfg),
        Err(AnnError::SizeMismatch { expected: 3, actual: 2, .. })
    ));
}

#[test]
fn output_weight_width_must_match_hidden() {
    let (dir, cfg) = csv_model();
    write(dir.path(), "ANNSFM_CS_OW.csv", "0.1,0.2,0.3,0.4,0.5,0.6\n");
    assert!(matches!(
        run(&cfg),
        Err(AnnError::SizeMismatch { expected: 3, actual: 6, .. })
    ));
}

#[test]
fn square_bias_file_is_not_a_vector() {
    let (dir, cfg) = csv_model();
    write(dir.path(), "ANNSFM_CS_HB.csv", "0,0\n0,0\n");
    assert!(matches!(run(&cfg), Err(AnnError::NotAVector { rows: 2, cols: 2, .. })));
}

#[test]
fn configured_hidden_size_is_checked() {
    let (_dir, mut cfg) = csv_model();
    cfg.hidden = Some(12);
    assert!(matches!(
        run(&cfg),
        Err(AnnError::SizeMismatch { expected: 12, actual: 3, .. })
    ));
}

#[test]
fn several_output_rows_take_the_matrix_path() {
    let (dir, cfg) = csv_model();
    write(dir.path(), "ANNSFM_CS_OW.csv", "0.1,0.2,0.3\n0.3,0.2,0.1\n");
    write(dir.path(), "ANNSFM_CS_OB.csv", "0,1\n");
    let report = run(&cfg).unwrap();
    assert_eq!(report.outputs, 2);
    assert_eq!(report.output_path, dir.path().join("prediction_matrix.csv"));
}
