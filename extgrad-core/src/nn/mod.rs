//! Neural-network building blocks: modules, parameters, layers and losses.

pub mod classifier;
pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;

pub use classifier::fully_connected_classifier;
pub use layers::{Linear, Sigmoid, UserActivation};
pub use losses::{ClassificationError, CrossEntropyWithSoftmax, Criterion, Reduction};
pub use module::Module;
pub use parameter::Parameter;
