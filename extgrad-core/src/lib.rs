//! Tensors, eager autograd and user-defined function nodes.
//!
//! The [`function`] module is the extension point: implement
//! [`function::UserFunction`] to inject a custom forward/backward computation
//! into a recorded graph with [`function::apply_user_function`].

pub mod autograd;
pub mod buffer;
pub mod device;
pub mod error;
pub mod function;
pub mod model;
pub mod nn;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod types;
pub mod utils;

pub use device::StorageDevice;
pub use error::ExtGradError;
pub use tensor::Tensor;
pub use types::DType;
// Re-export traits required by public functions/structs
pub use num_traits;
