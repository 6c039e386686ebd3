use std::sync::Arc;

use crate::error::ExtGradError;
use crate::types::DType;

/// Typed host-memory storage behind a tensor.
///
/// The `Arc` lets detached tensors and saved autograd inputs share one
/// allocation. Writers go through `Arc::make_mut`, so a buffer that is still
/// referenced elsewhere is copied before being modified.
#[derive(Debug, Clone)]
pub enum CpuBuffer {
    F32(Arc<Vec<f32>>),
    F64(Arc<Vec<f64>>),
}

impl CpuBuffer {
    pub fn dtype(&self) -> DType {
        match self {
            CpuBuffer::F32(_) => DType::F32,
            CpuBuffer::F64(_) => DType::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CpuBuffer::F32(data) => data.len(),
            CpuBuffer::F64(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `f32` storage, or an error if the buffer holds another type.
    pub fn try_get_cpu_f32(&self) -> Result<&Arc<Vec<f32>>, ExtGradError> {
        match self {
            CpuBuffer::F32(data_arc) => Ok(data_arc),
            other => Err(ExtGradError::DataTypeMismatch {
                expected: DType::F32,
                actual: other.dtype(),
                operation: "try_get_cpu_f32".to_string(),
            }),
        }
    }

    /// Returns the `f64` storage, or an error if the buffer holds another type.
    pub fn try_get_cpu_f64(&self) -> Result<&Arc<Vec<f64>>, ExtGradError> {
        match self {
            CpuBuffer::F64(data_arc) => Ok(data_arc),
            other => Err(ExtGradError::DataTypeMismatch {
                expected: DType::F64,
                actual: other.dtype(),
                operation: "try_get_cpu_f64".to_string(),
            }),
        }
    }
}
