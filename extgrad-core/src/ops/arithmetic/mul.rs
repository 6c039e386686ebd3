use crate::autograd::BackwardOp;
use crate::error::ExtGradError;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass for `c = a * b`: `dA = g * b`, `dB = g * a`.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        let a = self.a.detach();
        let b = self.b.detach();
        let grad_a = mul_op(grad_output, &b)?.reduce_to_shape(&a.shape())?;
        let grad_b = mul_op(grad_output, &a)?.reduce_to_shape(&b.shape())?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Element-wise multiplication with broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, ExtGradError> {
    crate::ops::apply_binary_op(
        a,
        b,
        |x, y| x * y,
        |x, y| x * y,
        |a, b, _| Arc::new(MulBackward { a, b }),
        "mul_op",
    )
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
