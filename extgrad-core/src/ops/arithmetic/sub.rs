use crate::autograd::BackwardOp;
use crate::error::ExtGradError;
use crate::ops::arithmetic::neg_op;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass for `c = a - b`: `dA = g`, `dB = -g`, each reduced to its
/// input's shape.
#[derive(Debug)]
struct SubBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        let grad_a = grad_output.reduce_to_shape(&self.a.shape())?;
        let grad_b = neg_op(grad_output)?.reduce_to_shape(&self.b.shape())?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Element-wise subtraction with broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, ExtGradError> {
    crate::ops::apply_binary_op(
        a,
        b,
        |x, y| x - y,
        |x, y| x - y,
        |a, b, _| Arc::new(SubBackward { a, b }),
        "sub_op",
    )
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
