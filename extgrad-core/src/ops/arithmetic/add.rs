use crate::autograd::BackwardOp;
use crate::error::ExtGradError;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass for `c = a + b` (with broadcasting).
///
/// The incoming gradient flows to both inputs unchanged, summed down to each
/// input's shape.
#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        let grad_a = grad_output.reduce_to_shape(&self.a.shape())?;
        let grad_b = grad_output.reduce_to_shape(&self.b.shape())?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Element-wise addition with broadcasting.
///
/// # Errors
/// `BroadcastError` for incompatible shapes, `DataTypeMismatch` for mixed dtypes.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, ExtGradError> {
    crate::ops::apply_binary_op(
        a,
        b,
        |x, y| x + y,
        |x, y| x + y,
        |a, b, _| Arc::new(AddBackward { a, b }),
        "add_op",
    )
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
