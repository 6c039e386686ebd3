use crate::buffer::CpuBuffer;
use crate::tensor::Tensor;
use std::sync::Arc;

impl Clone for Tensor {
    /// Clones the handle. Both handles refer to the same graph node.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl PartialEq for Tensor {
    /// Value comparison: same shape, dtype and elements. Autograd metadata is
    /// ignored.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        let a = self.read_data();
        let b = other.read_data();
        if a.shape != b.shape {
            return false;
        }
        match (&a.buffer, &b.buffer) {
            (CpuBuffer::F32(x), CpuBuffer::F32(y)) => x == y,
            (CpuBuffer::F64(x), CpuBuffer::F64(y)) => x == y,
            _ => false,
        }
    }
}
