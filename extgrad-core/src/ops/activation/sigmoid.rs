use crate::autograd::BackwardOp;
use crate::error::ExtGradError;
use crate::ops::arithmetic::{mul_op, sub_op};
use crate::tensor::{ones_like, Tensor};
use std::sync::Arc;

/// Backward pass for `s = sigmoid(a)`: `dA = g * s * (1 - s)`.
#[derive(Debug)]
struct SigmoidBackward {
    a: Tensor,
    output: Tensor,
}

impl BackwardOp for SigmoidBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        let one_minus_s = sub_op(&ones_like(&self.output)?, &self.output)?;
        let grad_a = mul_op(&mul_op(grad_output, &self.output)?, &one_minus_s)?;
        Ok(vec![grad_a])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }
}

/// Element-wise logistic sigmoid `1 / (1 + exp(-x))`.
pub fn sigmoid_op(a: &Tensor) -> Result<Tensor, ExtGradError> {
    crate::ops::apply_unary_op(
        a,
        |x| 1.0 / (1.0 + (-x).exp()),
        |x| 1.0 / (1.0 + (-x).exp()),
        |a, output| Arc::new(SigmoidBackward { a, output }),
        "sigmoid_op",
    )
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
