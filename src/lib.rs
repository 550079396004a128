pub mod math;
pub mod activation;
pub mod normalize;
pub mod io;
pub mod layers;
pub mod network;
pub mod config;
pub mod error;
pub mod pipeline;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use normalize::bipolar::{normalize, denormalize, FeatureBounds};
pub use layers::dense::Layer;
pub use network::{Network, WeightSet, Prediction, PhysicalScale};
pub use config::{PipelineConfig, FileFormat, ModelFiles};
pub use error::{AnnError, Result};
pub use pipeline::{run, InferenceReport};
