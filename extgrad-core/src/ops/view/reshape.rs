use crate::autograd::BackwardOp;
use crate::error::ExtGradError;
use crate::tensor::utils::calculate_strides;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::sync::Arc;

#[derive(Debug)]
struct ReshapeBackward {
    a: Tensor,
    original_shape: Vec<usize>,
}

impl BackwardOp for ReshapeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        Ok(vec![reshape_op(grad_output, self.original_shape.clone())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }
}

/// Returns a tensor with the same elements in row-major order and a new shape.
///
/// The result shares storage with `a`.
///
/// # Errors
/// Returns `ShapeMismatch` if the element counts differ.
pub fn reshape_op(a: &Tensor, new_shape: Vec<usize>) -> Result<Tensor, ExtGradError> {
    let guard = a.read_data();
    let new_numel: usize = new_shape.iter().product();
    if new_numel != guard.numel() {
        return Err(ExtGradError::ShapeMismatch {
            expected: format!("{} elements", guard.numel()),
            actual: format!("{:?}", new_shape),
            operation: "reshape_op".to_string(),
        });
    }
    let requires_grad = guard.requires_grad;
    let original_shape = guard.shape.clone();
    let output = Tensor::from_tensor_data(TensorData {
        buffer: guard.buffer.clone(),
        device: guard.device,
        dtype: guard.dtype,
        strides: calculate_strides(&new_shape),
        shape: new_shape,
        requires_grad: false,
        grad: None,
        grad_fn: None,
    });
    drop(guard);

    crate::ops::attach_grad_fn(&output, requires_grad, || {
        Arc::new(ReshapeBackward {
            a: a.clone(),
            original_shape,
        })
    });
    Ok(output)
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
