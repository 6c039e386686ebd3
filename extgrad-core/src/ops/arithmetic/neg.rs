use crate::autograd::BackwardOp;
use crate::error::ExtGradError;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass for `b = -a`: `dA = -g`.
#[derive(Debug)]
struct NegBackward {
    a: Tensor,
}

impl BackwardOp for NegBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        Ok(vec![neg_op(grad_output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }
}

pub fn neg_op(a: &Tensor) -> Result<Tensor, ExtGradError> {
    crate::ops::apply_unary_op(
        a,
        |x| -x,
        |x| -x,
        |a, _| Arc::new(NegBackward { a }),
        "neg_op",
    )
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
