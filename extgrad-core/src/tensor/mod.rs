// src/tensor/mod.rs

use crate::device::StorageDevice;
use crate::error::ExtGradError;
use crate::tensor_data::TensorData;
use crate::types::DType;
use std::sync::{Arc, RwLock};

mod accessors;
mod autograd_methods;
mod debug;
mod inplace_arithmetic_methods;
mod reduction_methods;
mod traits;
mod view_methods;

pub mod broadcast_utils;
pub mod create;
pub mod utils;

pub use create::{
    from_vec_f32, from_vec_f64, full, full_f64, full_like, ones, ones_f64, ones_like, randn,
    uniform, zeros, zeros_f64, zeros_like,
};

/// Identity of a node in the computation graph: the address of its shared data.
pub type NodeId = *const RwLock<TensorData>;

/// Represents a multi-dimensional array (tensor).
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally:
/// 1.  **Shared Ownership:** clones are cheap and point at the same node.
/// 2.  **Interior Mutability:** `requires_grad`, `grad` and `grad_fn` can be
///     updated through a shared reference.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new `f32` tensor on the CPU.
    ///
    /// # Errors
    /// Returns `ExtGradError::TensorCreationError` if the data length does not
    /// match the shape.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, ExtGradError> {
        let tensor_data = TensorData::new(data_vec, shape)?;
        Ok(Self::from_tensor_data(tensor_data))
    }

    /// Creates a new `f64` tensor on the CPU.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, ExtGradError> {
        let tensor_data = TensorData::new_f64(data_vec, shape)?;
        Ok(Self::from_tensor_data(tensor_data))
    }

    pub(crate) fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    pub fn dtype(&self) -> DType {
        self.read_data().dtype
    }

    pub fn device(&self) -> StorageDevice {
        self.read_data().device
    }

    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    pub fn strides(&self) -> Vec<usize> {
        self.read_data().strides.clone()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns the graph identity of this tensor.
    pub fn node_id(&self) -> NodeId {
        Arc::as_ptr(&self.data)
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> std::sync::RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> std::sync::RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }
}
