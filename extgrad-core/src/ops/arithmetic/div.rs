use crate::autograd::BackwardOp;
use crate::error::ExtGradError;
use crate::ops::arithmetic::{mul_op, neg_op};
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass for `c = a / b`: `dA = g / b`, `dB = -g * c / b`.
#[derive(Debug)]
struct DivBackward {
    a: Tensor,
    b: Tensor,
    output: Tensor,
}

impl BackwardOp for DivBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        let b = self.b.detach();
        let grad_a = div_op(grad_output, &b)?.reduce_to_shape(&self.a.shape())?;
        let grad_b = neg_op(&div_op(&mul_op(grad_output, &self.output)?, &b)?)?
            .reduce_to_shape(&b.shape())?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Element-wise division with broadcasting. Division by zero follows IEEE 754.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, ExtGradError> {
    crate::ops::apply_binary_op(
        a,
        b,
        |x, y| x / y,
        |x, y| x / y,
        |a, b, output| Arc::new(DivBackward { a, b, output }),
        "div_op",
    )
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
