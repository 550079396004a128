//! Output cardinality inference and output post-processing.
//!
//! OUT is never fixed up front: it is the output-weight element count divided
//! by the hidden size. A single output channel is additionally rescaled into
//! a relative `[-1, 1]` series and into physical units; several channels are
//! passed through untouched because they share no common bounds.

use log::{info, warn};
use serde::{Serialize, Deserialize};

use crate::error::{AnnError, Result};
use crate::math::matrix::Matrix;
use crate::normalize::bipolar::{denormalize, is_degenerate, normalize};

/// Derives OUT from the flat output-weight length.
pub fn resolve_output_count(weight_len: usize, hidden: usize) -> Result<usize> {
    if hidden == 0 || weight_len % hidden != 0 {
        return Err(AnnError::Shape {
            what: "output weights".into(),
            len: weight_len,
            divisor: hidden,
        });
    }
    Ok(weight_len / hidden)
}

/// Reshapes flat output weights into `OUT x HN` and checks the bias length against OUT.
pub fn resolve_output_weights(weights: Vec<f64>, hidden: usize, bias_len: usize) -> Result<Matrix> {
    let out = resolve_output_count(weights.len(), hidden)?;
    if bias_len != out {
        return Err(AnnError::size_mismatch("output bias", out, bias_len));
    }
    info!("resolved {} output channel(s) from {} weights over {} hidden neurons", out, weights.len(), hidden);
    Matrix::from_flat(out, hidden, weights)
}

/// Pipeline constants of the physical-unit transform:
/// `Y = (denormalize(O, minO, maxO) + offset) * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalScale {
    pub offset: f64,
    pub scale: f64,
}

impl Default for PhysicalScale {
    fn default() -> Self {
        PhysicalScale { offset: 0.7, scale: 100.0 }
    }
}

/// The three per-sample series exported for a single output channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleOutput {
    pub raw: Vec<f64>,
    /// `raw` rescaled into `[-1, 1]` over its own min/max.
    pub normalized: Vec<f64>,
    /// `raw` mapped into physical units.
    pub physical: Vec<f64>,
    pub min: f64,
    pub max: f64,
    /// All raw predictions were equal, so `normalized` fell back to zeros.
    pub degenerate_range: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Single(SingleOutput),
    /// Raw `OUT x N` activations for OUT > 1.
    Multi(Matrix),
}

impl Prediction {
    pub fn outputs(&self) -> usize {
        match self {
            Prediction::Single(_) => 1,
            Prediction::Multi(m) => m.rows(),
        }
    }

    pub fn samples(&self) -> usize {
        match self {
            Prediction::Single(s) => s.raw.len(),
            Prediction::Multi(m) => m.cols(),
        }
    }
}

/// Picks the post-processing branch from the number of output rows.
pub fn resolve_prediction(outputs: Matrix, scale: PhysicalScale) -> Result<Prediction> {
    if outputs.rows() == 1 {
        Ok(Prediction::Single(rescale_single(outputs.row(0)?, scale)))
    } else {
        Ok(Prediction::Multi(outputs))
    }
}

/// Derives `new_O` and `Y` from the raw single-channel predictions.
pub fn rescale_single(raw: &[f64], scale: PhysicalScale) -> SingleOutput {
    let (min, max) = if raw.is_empty() {
        (0.0, 0.0)
    } else {
        raw.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(mn, mx), &x| (mn.min(x), mx.max(x)))
    };

    let degenerate_range = is_degenerate(min, max);
    if degenerate_range && !raw.is_empty() {
        warn!("raw predictions span a degenerate range [{}, {}]; new_O falls back to 0", min, max);
    }

    let normalized = raw.iter().map(|&o| normalize(o, min, max)).collect();
    let physical = raw.iter()
        .map(|&o| (denormalize(o, min, max) + scale.offset) * scale.scale)
        .collect();

    SingleOutput {
        raw: raw.to_vec(),
        normalized,
        physical,
        min,
        max,
        degenerate_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_count_divides_weight_length() {
        assert_eq!(resolve_output_count(12, 12).unwrap(), 1);
        assert_eq!(resolve_output_count(36, 12).unwrap(), 3);
        assert!(matches!(
            resolve_output_count(13, 12),
            Err(AnnError::Shape { len: 13, divisor: 12, .. })
        ));
        assert!(matches!(resolve_output_count(4, 0), Err(AnnError::Shape { .. })));
    }

    #[test]
    fn output_bias_must_match_resolved_count() {
        let err = resolve_output_weights(vec![0.0; 24], 12, 1).unwrap_err();
        assert!(matches!(err, AnnError::SizeMismatch { expected: 2, actual: 1, .. }));

        let w = resolve_output_weights((0..24).map(f64::from).collect(), 12, 2).unwrap();
        assert_eq!(w.shape(), (2, 12));
        assert_eq!(w.get(1, 0).unwrap(), 12.0);
    }

    #[test]
    fn single_output_rescale_hits_unit_edges() {
        let raw = [0.12, -0.4, 0.9, 0.33, -0.05];
        let scale = PhysicalScale::default();
        let s = rescale_single(&raw, scale);

        assert_eq!(s.min, -0.4);
        assert_eq!(s.max, 0.9);
        assert_eq!(s.normalized[1], -1.0);
        assert_eq!(s.normalized[2], 1.0);
        assert!(!s.degenerate_range);

        for (i, &o) in raw.iter().enumerate() {
            let expected = (((o + 1.0) / 2.0 * (0.9 - -0.4) + -0.4) + 0.7) * 100.0;
            assert!((s.physical[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_predictions_flag_degenerate_range() {
        let s = rescale_single(&[0.25; 4], PhysicalScale::default());
        assert!(s.degenerate_range);
        assert_eq!(s.normalized, vec![0.0; 4]);
        // (0.25 + 1) / 2 * 0 + 0.25 = 0.25
        assert!((s.physical[0] - 95.0).abs() < 1e-9);
    }

    #[test]
    fn multiple_outputs_pass_through_unchanged() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        match resolve_prediction(m.clone(), PhysicalScale::default()).unwrap() {
            Prediction::Multi(out) => assert_eq!(out, m),
            other => panic!("expected multi-output, got {other:?}"),
        }
    }

    #[test]
    fn single_row_takes_rescale_branch() {
        let m = Matrix::from_rows(vec![vec![0.1, 0.2, 0.3]]).unwrap();
        let p = resolve_prediction(m, PhysicalScale::default()).unwrap();
        assert_eq!(p.outputs(), 1);
        assert_eq!(p.samples(), 3);
        assert!(matches!(p, Prediction::Single(_)));
    }
}
