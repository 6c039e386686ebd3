use crate::autograd::BackwardOp;
use crate::error::ExtGradError;
use crate::ops::arithmetic::mul_op;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass for `b = exp(a)`: `dA = g * b`.
#[derive(Debug)]
struct ExpBackward {
    a: Tensor,
    output: Tensor,
}

impl BackwardOp for ExpBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        Ok(vec![mul_op(grad_output, &self.output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }
}

/// Element-wise natural exponential.
pub fn exp_op(a: &Tensor) -> Result<Tensor, ExtGradError> {
    crate::ops::apply_unary_op(
        a,
        |x| x.exp(),
        |x| x.exp(),
        |a, output| Arc::new(ExpBackward { a, output }),
        "exp_op",
    )
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
