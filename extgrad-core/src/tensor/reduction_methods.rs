use crate::error::ExtGradError;
use crate::ops::reduction::{mean_op, sum_op};
use crate::tensor::Tensor;

impl Tensor {
    /// Sums over `axes` (all axes when `None`).
    pub fn sum(&self, axes: Option<&[usize]>, keep_dims: bool) -> Result<Tensor, ExtGradError> {
        sum_op(self, axes, keep_dims)
    }

    /// Averages over `axes` (all axes when `None`).
    pub fn mean(&self, axes: Option<&[usize]>, keep_dims: bool) -> Result<Tensor, ExtGradError> {
        mean_op(self, axes, keep_dims)
    }
}
