pub mod bipolar;

pub use bipolar::{normalize, denormalize, normalize_inputs, FeatureBounds, NormalizedInputs};
