//! End-to-end inference: load, normalize, forward, resolve, export.

use std::path::PathBuf;

use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::config::config::{FileFormat, PipelineConfig};
use crate::error::{AnnError, Result};
use crate::io::{export, loader};
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::network::resolver::{resolve_prediction, PhysicalScale, Prediction};
use crate::network::weights::WeightSet;
use crate::normalize::bipolar::{normalize_inputs, FeatureBounds};

/// Every tensor one run consumes.
#[derive(Debug, Clone)]
pub struct ModelInputs {
    /// N x F raw samples.
    pub samples: Matrix,
    pub bounds: FeatureBounds,
    pub weights: WeightSet,
}

/// The in-memory outcome of a run, before export.
#[derive(Debug, Clone)]
pub struct Inference {
    pub prediction: Prediction,
    pub degenerate_features: Vec<usize>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceReport {
    pub samples: usize,
    pub features: usize,
    pub hidden: usize,
    pub outputs: usize,
    pub output_path: PathBuf,
    pub degenerate_features: Vec<usize>,
    pub degenerate_output_range: bool,
}

/// Loads the samples, bounds and weights named by `config`.
pub fn load(config: &PipelineConfig) -> Result<ModelInputs> {
    config.validate()?;
    let files = &config.files;

    let (samples, bounds) = match config.format {
        FileFormat::Whitespace => {
            let features = config.features
                .ok_or_else(|| AnnError::Config("whitespace format requires `features`".into()))?;
            let nums = loader::read_numbers(&files.inputs)?;
            let n = match config.samples {
                Some(n) => n,
                None if nums.len() % features == 0 => nums.len() / features,
                None => {
                    return Err(AnnError::Shape {
                        what: files.inputs.display().to_string(),
                        len: nums.len(),
                        divisor: features,
                    })
                }
            };
            let samples = loader::shape_matrix(nums, n, features, &files.inputs.display().to_string())?;
            let bounds = loader::read_matrix_fixed(&files.bounds, 2, features)?;
            (samples, bounds)
        }
        FileFormat::Csv => {
            let samples = loader::read_table(&files.inputs)?;
            let name = files.inputs.display().to_string();
            if let Some(n) = config.samples {
                if samples.rows() != n {
                    return Err(AnnError::size_mismatch(format!("{name} rows"), n, samples.rows()));
                }
            }
            if let Some(f) = config.features {
                if samples.cols() != f {
                    return Err(AnnError::size_mismatch(format!("{name} columns"), f, samples.cols()));
                }
            }
            let bounds = loader::read_table(&files.bounds)?;
            if bounds.shape() != (2, samples.cols()) {
                return Err(AnnError::size_mismatch(
                    format!("{} (2 x F)", files.bounds.display()),
                    2 * samples.cols(),
                    bounds.rows() * bounds.cols(),
                ));
            }
            (samples, bounds)
        }
    };

    let bounds = FeatureBounds::from_matrix(&bounds)?;
    let weights = WeightSet::load(files, config.format, samples.cols(), config.hidden)?;
    debug!("loaded {}x{} samples", samples.rows(), samples.cols());

    Ok(ModelInputs { samples, bounds, weights })
}

/// Normalizes the samples, runs the network and picks the output branch.
pub fn infer(model: ModelInputs, output_activation: bool, scale: PhysicalScale) -> Result<Inference> {
    let normalized = normalize_inputs(&model.samples, &model.bounds)?;
    let network = Network::from_weights(model.weights, output_activation)?;
    let outputs = network.forward(&normalized.matrix)?;
    let prediction = resolve_prediction(outputs, scale)?;

    Ok(Inference {
        prediction,
        degenerate_features: normalized.degenerate_features,
    })
}

/// Runs the whole pipeline and writes the result file.
pub fn run(config: &PipelineConfig) -> Result<InferenceReport> {
    let model = load(config)?;
    let (samples, features) = model.samples.shape();
    let hidden = model.weights.hidden();
    info!("N={} F={} HN={} OUT={}", samples, features, hidden, model.weights.outputs());

    let inference = infer(model, config.output_activation, config.physical_scale())?;

    let (output_path, degenerate_output_range) = match &inference.prediction {
        Prediction::Single(series) => {
            export::write_single(&config.files.single_output, series)?;
            (config.files.single_output.clone(), series.degenerate_range)
        }
        Prediction::Multi(matrix) => {
            export::write_multi(&config.files.multi_output, matrix)?;
            (config.files.multi_output.clone(), false)
        }
    };

    Ok(InferenceReport {
        samples,
        features,
        hidden,
        outputs: inference.prediction.outputs(),
        output_path,
        degenerate_features: inference.degenerate_features,
        degenerate_output_range,
    })
}
