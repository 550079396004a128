pub mod network;
pub mod resolver;
pub mod weights;

pub use network::Network;
pub use resolver::{Prediction, PhysicalScale, SingleOutput};
pub use weights::WeightSet;
