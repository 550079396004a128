use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    /// `2 / (1 + e^(-2x)) - 1`, range (-1, 1). Numerically matches `tanh`.
    BipolarSigmoid,
    /// Leaves the pre-activation untouched.
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::BipolarSigmoid => 2.0 / (1.0 + (-2.0 * x).exp()) - 1.0,
            ActivationFunction::Identity => x,
        }
    }
}
