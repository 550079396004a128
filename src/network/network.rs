use log::debug;

use crate::{
    activation::activation::ActivationFunction,
    error::{AnnError, Result},
    layers::dense::Layer,
    math::matrix::Matrix,
    network::weights::WeightSet,
};

/// A fixed hidden + output network.
///
/// The hidden layer always uses the bipolar sigmoid; whether the output
/// layer does is decided by whoever builds the network.
#[derive(Debug, Clone)]
pub struct Network {
    pub hidden: Layer,
    pub output: Layer,
}

impl Network {
    pub fn new(hidden: Layer, output: Layer) -> Result<Network> {
        if output.input_size() != hidden.size() {
            return Err(AnnError::DimensionMismatch {
                op: "layer chaining",
                left: hidden.weights.shape(),
                right: output.weights.shape(),
            });
        }
        Ok(Network { hidden, output })
    }

    /// Builds the network from loaded weights.
    pub fn from_weights(weights: WeightSet, output_activation: bool) -> Result<Network> {
        let output_act = if output_activation {
            ActivationFunction::BipolarSigmoid
        } else {
            ActivationFunction::Identity
        };
        let hidden = Layer::new(weights.hidden_weights, weights.hidden_bias, ActivationFunction::BipolarSigmoid)?;
        let output = Layer::new(weights.output_weights, weights.output_bias, output_act)?;
        Network::new(hidden, output)
    }

    pub fn features(&self) -> usize {
        self.hidden.input_size()
    }

    pub fn outputs(&self) -> usize {
        self.output.size()
    }

    /// Forward pass over an N x F batch of normalized samples.
    ///
    /// Returns the OUT x N prediction matrix (one column per sample).
    pub fn forward(&self, inputs: &Matrix) -> Result<Matrix> {
        if inputs.cols() != self.features() {
            return Err(AnnError::DimensionMismatch {
                op: "forward",
                left: self.hidden.weights.shape(),
                right: inputs.shape(),
            });
        }

        let samples = inputs.transpose();
        let hidden = self.hidden.feed_from(&samples)?;
        let out = self.output.feed_from(&hidden)?;
        debug!("forward: {} samples -> {}x{} predictions", inputs.rows(), out.rows(), out.cols());
        Ok(out)
    }

    /// Forward pass for one sample.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        let batch = Matrix::from_flat(1, input.len(), input.to_vec())?;
        Ok(self.forward(&batch)?.into_vec())
    }

    /// The 3-3-3 demonstration network: no biases, bipolar sigmoid on both layers.
    pub fn demo() -> Result<Network> {
        let w = Matrix::from_flat(3, 3, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9])?;
        Network::new(
            Layer::unbiased(w.clone(), ActivationFunction::BipolarSigmoid),
            Layer::unbiased(w, ActivationFunction::BipolarSigmoid),
        )
    }
}
