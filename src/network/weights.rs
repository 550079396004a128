use log::debug;

use crate::config::config::{FileFormat, ModelFiles};
use crate::error::{AnnError, Result};
use crate::io::loader;
use crate::math::matrix::Matrix;
use crate::network::resolver::resolve_output_weights;

/// The pretrained parameters of both layers.
///
/// - `hidden_weights`: HN x F
/// - `hidden_bias`:    HN
/// - `output_weights`: OUT x HN
/// - `output_bias`:    OUT
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSet {
    pub hidden_weights: Matrix,
    pub hidden_bias: Vec<f64>,
    pub output_weights: Matrix,
    pub output_bias: Vec<f64>,
}

impl WeightSet {
    /// Loads all four tensors.
    ///
    /// `features` is F as read from the inputs; `hidden` is HN when the
    /// caller knows it up front (mandatory for `FileFormat::Whitespace`).
    pub fn load(files: &ModelFiles, format: FileFormat, features: usize, hidden: Option<usize>) -> Result<WeightSet> {
        let set = match format {
            FileFormat::Whitespace => {
                let hidden = hidden
                    .ok_or_else(|| AnnError::Config("whitespace format requires `hidden`".into()))?;
                WeightSet::load_fixed(files, features, hidden)?
            }
            FileFormat::Csv => WeightSet::load_tabular(files, features, hidden)?,
        };
        set.validate(features)?;
        Ok(set)
    }

    fn load_fixed(files: &ModelFiles, features: usize, hidden: usize) -> Result<WeightSet> {
        let hidden_weights = loader::read_matrix_fixed(&files.hidden_weights, hidden, features)?;
        let hidden_bias = loader::read_vector_fixed(&files.hidden_bias, hidden)?;
        let output_flat = loader::read_numbers(&files.output_weights)?;
        let output_bias = loader::read_numbers(&files.output_bias)?;
        let output_weights = resolve_output_weights(output_flat, hidden, output_bias.len())?;

        Ok(WeightSet { hidden_weights, hidden_bias, output_weights, output_bias })
    }

    fn load_tabular(files: &ModelFiles, features: usize, hidden: Option<usize>) -> Result<WeightSet> {
        let hidden_weights = loader::read_table(&files.hidden_weights)?;
        let what = files.hidden_weights.display().to_string();
        if hidden_weights.cols() != features {
            return Err(AnnError::size_mismatch(format!("{what} columns"), features, hidden_weights.cols()));
        }
        let hn = hidden_weights.rows();
        if let Some(expected) = hidden {
            if hn != expected {
                return Err(AnnError::size_mismatch(format!("{what} rows"), expected, hn));
            }
        }

        let hidden_bias = loader::read_table_vector(&files.hidden_bias)?;
        if hidden_bias.len() != hn {
            return Err(AnnError::size_mismatch(files.hidden_bias.display().to_string(), hn, hidden_bias.len()));
        }

        let output_table = loader::read_table(&files.output_weights)?;
        if output_table.cols() != hn {
            return Err(AnnError::size_mismatch(
                format!("{} columns", files.output_weights.display()),
                hn,
                output_table.cols(),
            ));
        }
        let output_bias = loader::read_table_vector(&files.output_bias)?;
        let output_weights = resolve_output_weights(output_table.into_vec(), hn, output_bias.len())?;

        Ok(WeightSet { hidden_weights, hidden_bias, output_weights, output_bias })
    }

    /// Checks the cross-tensor shape invariants against the feature count F.
    pub fn validate(&self, features: usize) -> Result<()> {
        let hn = self.hidden_weights.rows();
        if self.hidden_weights.cols() != features {
            return Err(AnnError::size_mismatch("hidden weight columns", features, self.hidden_weights.cols()));
        }
        if self.hidden_bias.len() != hn {
            return Err(AnnError::size_mismatch("hidden bias", hn, self.hidden_bias.len()));
        }
        if self.output_weights.cols() != hn {
            return Err(AnnError::size_mismatch("output weight columns", hn, self.output_weights.cols()));
        }
        if self.output_bias.len() != self.output_weights.rows() {
            return Err(AnnError::size_mismatch("output bias", self.output_weights.rows(), self.output_bias.len()));
        }
        debug!("weights: HN={} F={} OUT={}", hn, features, self.outputs());
        Ok(())
    }

    pub fn hidden(&self) -> usize {
        self.hidden_weights.rows()
    }

    pub fn outputs(&self) -> usize {
        self.output_weights.rows()
    }
}
