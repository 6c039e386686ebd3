use crate::error::ExtGradError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable operation.
///
/// An implementation is stored in the output tensor's `grad_fn` and is invoked
/// by `Tensor::backward` to propagate gradients according to the chain rule.
///
/// Implementations must not hold a handle to their own output tensor: keep a
/// `detach()`ed copy instead, otherwise the output and its `grad_fn` keep each
/// other alive.
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes `dL/dInput_i` for each input from `dL/dOutput`.
    ///
    /// The returned `Vec` must line up with [`inputs`](Self::inputs): one
    /// gradient per recorded input, each shaped like that input.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError>;

    /// The input tensors recorded by this node, in the order gradients are
    /// returned from [`backward`](Self::backward).
    fn inputs(&self) -> Vec<Tensor>;
}
