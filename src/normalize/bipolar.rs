use log::warn;

use crate::error::{AnnError, Result};
use crate::math::matrix::Matrix;

/// Ranges narrower than this are treated as degenerate and map to `0`.
pub const DEGENERATE_RANGE: f64 = 1e-12;

/// Maps `x` from `[min, max]` onto `[-1, 1]`.
///
/// A degenerate range (`|max - min| < 1e-12`) yields `0` instead of failing.
/// Use [`is_degenerate`] to detect that case.
pub fn normalize(x: f64, min: f64, max: f64) -> f64 {
    let denom = max - min;
    if is_degenerate(min, max) {
        return 0.0;
    }
    -1.0 + 2.0 * (x - min) / denom
}

/// Inverse of [`normalize`] for a well-conditioned range.
pub fn denormalize(y: f64, min: f64, max: f64) -> f64 {
    (y + 1.0) / 2.0 * (max - min) + min
}

pub fn is_degenerate(min: f64, max: f64) -> bool {
    (max - min).abs() < DEGENERATE_RANGE
}

/// Per-feature `[min, max]` pairs used to scale raw inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBounds {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl FeatureBounds {
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Result<FeatureBounds> {
        if min.len() != max.len() {
            return Err(AnnError::size_mismatch("feature bounds max row", min.len(), max.len()));
        }
        Ok(FeatureBounds { min, max })
    }

    /// Reads a 2xF bounds matrix: row 0 holds the minima, row 1 the maxima.
    pub fn from_matrix(bounds: &Matrix) -> Result<FeatureBounds> {
        if bounds.rows() != 2 {
            return Err(AnnError::size_mismatch("feature bounds rows", 2, bounds.rows()));
        }
        FeatureBounds::new(bounds.row(0)?.to_vec(), bounds.row(1)?.to_vec())
    }

    /// Identity-like bounds: `[-1, 1]` for every feature, so normalization is a no-op.
    pub fn identity(features: usize) -> FeatureBounds {
        FeatureBounds {
            min: vec![-1.0; features],
            max: vec![1.0; features],
        }
    }

    /// Number of features F the bounds cover.
    pub fn features(&self) -> usize {
        self.min.len()
    }

    /// Indices of features whose range is degenerate.
    pub fn degenerate_features(&self) -> Vec<usize> {
        self.min.iter().zip(&self.max)
            .enumerate()
            .filter(|(_, (mn, mx))| is_degenerate(**mn, **mx))
            .map(|(j, _)| j)
            .collect()
    }
}

/// Result of scaling an N x F sample batch.
#[derive(Debug, Clone)]
pub struct NormalizedInputs {
    pub matrix: Matrix,
    /// Feature indices that fell back to `0` because their range is degenerate.
    pub degenerate_features: Vec<usize>,
}

/// Scales every column `j` of `inputs` with `bounds[j]`.
///
/// Degenerate bounds do not abort the run; they are logged and reported.
pub fn normalize_inputs(inputs: &Matrix, bounds: &FeatureBounds) -> Result<NormalizedInputs> {
    if bounds.features() != inputs.cols() {
        return Err(AnnError::size_mismatch("feature bounds", inputs.cols(), bounds.features()));
    }

    let degenerate_features = bounds.degenerate_features();
    for &j in &degenerate_features {
        warn!(
            "feature {} has a degenerate range [{}, {}]; its inputs normalize to 0",
            j, bounds.min[j], bounds.max[j]
        );
    }

    let mut data = Vec::with_capacity(inputs.rows() * inputs.cols());
    for i in 0..inputs.rows() {
        let row = inputs.row(i)?;
        data.extend(
            row.iter().enumerate()
                .map(|(j, &x)| normalize(x, bounds.min[j], bounds.max[j])),
        );
    }

    Ok(NormalizedInputs {
        matrix: Matrix::from_flat(inputs.rows(), inputs.cols(), data)?,
        degenerate_features,
    })
}
