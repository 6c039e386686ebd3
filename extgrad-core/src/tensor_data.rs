// src/tensor_data.rs
use std::fmt::Debug;
use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::buffer::CpuBuffer;
use crate::device::StorageDevice;
use crate::error::ExtGradError;
use crate::tensor::utils::calculate_strides;
use crate::tensor::Tensor;
use crate::types::DType;

/// Internal storage and metadata for a Tensor.
///
/// Wrapped in `Arc<RwLock<TensorData>>` by `Tensor` so handles are cheap to
/// clone and autograd metadata can change behind a shared reference.
/// Storage is always contiguous and row-major.
#[derive(Debug)]
pub struct TensorData {
    /// Typed host buffer. Shared (via the inner `Arc`) with detached copies.
    pub(crate) buffer: CpuBuffer,
    pub(crate) device: StorageDevice,
    pub(crate) dtype: DType,
    pub(crate) shape: Vec<usize>,
    pub(crate) strides: Vec<usize>,

    /// Whether operations on this tensor are recorded for backpropagation.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient. Only leaves receive one during `backward()`.
    pub(crate) grad: Option<Tensor>,
    /// The operation that produced this tensor. `None` for leaves.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates CPU `f32` storage for `shape`.
    ///
    /// # Errors
    /// Returns `ExtGradError::TensorCreationError` if `data_vec.len()` does not
    /// match the number of elements in `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, ExtGradError> {
        Self::from_buffer(CpuBuffer::F32(Arc::new(data_vec)), shape)
    }

    /// Creates CPU `f64` storage for `shape`.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, ExtGradError> {
        Self::from_buffer(CpuBuffer::F64(Arc::new(data_vec)), shape)
    }

    pub(crate) fn from_buffer(buffer: CpuBuffer, shape: Vec<usize>) -> Result<Self, ExtGradError> {
        let numel: usize = shape.iter().product();
        let data_len = buffer.len();
        if data_len != numel {
            return Err(ExtGradError::TensorCreationError { data_len, shape });
        }
        let strides = calculate_strides(&shape);
        Ok(TensorData {
            dtype: buffer.dtype(),
            buffer,
            device: StorageDevice::CPU,
            shape,
            strides,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Number of elements described by the shape.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn buffer(&self) -> &CpuBuffer {
        &self.buffer
    }

    pub fn is_leaf(&self) -> bool {
        self.grad_fn.is_none()
    }
}
