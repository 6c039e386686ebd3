use crate::buffer::CpuBuffer;
use crate::error::ExtGradError;
use crate::tensor::Tensor;
use std::sync::Arc;

impl Tensor {
    /// Computes `self -= alpha * other` in place, bypassing autograd.
    ///
    /// Intended for optimizer updates on leaf parameters. If the storage is
    /// still shared with a detached copy, it is copied first.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` or `DataTypeMismatch` if `other` differs from
    /// `self` in shape or dtype.
    pub fn sub_scaled_(&self, other: &Tensor, alpha: f64) -> Result<(), ExtGradError> {
        if self.node_id() == other.node_id() {
            return Err(ExtGradError::InvalidArgument(
                "sub_scaled_ cannot read from the tensor it writes".to_string(),
            ));
        }
        let other_guard = other.read_data();
        let mut guard = self.write_data();
        if guard.shape != other_guard.shape {
            return Err(ExtGradError::ShapeMismatch {
                expected: format!("{:?}", guard.shape),
                actual: format!("{:?}", other_guard.shape),
                operation: "sub_scaled_".to_string(),
            });
        }

        match (&mut guard.buffer, &other_guard.buffer) {
            (CpuBuffer::F32(data), CpuBuffer::F32(other_data)) => {
                let alpha = alpha as f32;
                for (v, o) in Arc::make_mut(data).iter_mut().zip(other_data.iter()) {
                    *v -= alpha * o;
                }
            }
            (CpuBuffer::F64(data), CpuBuffer::F64(other_data)) => {
                for (v, o) in Arc::make_mut(data).iter_mut().zip(other_data.iter()) {
                    *v -= alpha * o;
                }
            }
            (this, that) => {
                return Err(ExtGradError::DataTypeMismatch {
                    expected: this.dtype(),
                    actual: that.dtype(),
                    operation: "sub_scaled_".to_string(),
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "inplace_arithmetic_methods_test.rs"]
mod tests;
