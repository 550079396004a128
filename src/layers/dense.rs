use log::debug;

use crate::{activation::activation::ActivationFunction, error::{AnnError, Result}, math::matrix::Matrix};

/// One dense stage: `activation(weights · input + bias)`.
///
/// `weights` is `size x input_size`; the input is laid out one sample per
/// column, so a batch of N samples is `input_size x N`.
#[derive(Debug, Clone)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activator: ActivationFunction,
}

impl Layer {
    pub fn new(weights: Matrix, biases: Vec<f64>, activation: ActivationFunction) -> Result<Layer> {
        if biases.len() != weights.rows() {
            return Err(AnnError::size_mismatch("layer bias", weights.rows(), biases.len()));
        }
        Ok(Layer { weights, biases, activator: activation })
    }

    /// A layer with all-zero biases.
    pub fn unbiased(weights: Matrix, activation: ActivationFunction) -> Layer {
        let biases = vec![0.0; weights.rows()];
        Layer { weights, biases, activator: activation }
    }

    /// Number of neurons in this layer.
    pub fn size(&self) -> usize {
        self.weights.rows()
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols()
    }

    /// Pre-activation `weights · input + bias`, shape `size x N`.
    pub fn pre_activation(&self, input: &Matrix) -> Result<Matrix> {
        self.weights.matmul(input)?.add_row_bias(&self.biases)
    }

    pub fn feed_from(&self, input: &Matrix) -> Result<Matrix> {
        let z = self.pre_activation(input)?;
        debug!(
            "dense {}x{} -> {}x{} ({:?})",
            self.size(), self.input_size(), z.rows(), z.cols(), self.activator
        );
        Ok(match self.activator {
            ActivationFunction::Identity => z,
            act => z.map(|x| act.function(x)),
        })
    }
}
