use super::utils::process_reduction_params;
use crate::error::ExtGradError;
use crate::ops::arithmetic::mul_op;
use crate::ops::reduction::sum_op;
use crate::tensor::{full_like, Tensor};

/// Averages the elements of `a` over `axes` (every axis when `None`).
///
/// Built from `sum_op` and a scale, so autograd comes from those nodes.
pub fn mean_op(a: &Tensor, axes: Option<&[usize]>, keep_dims: bool) -> Result<Tensor, ExtGradError> {
    let shape = a.shape();
    let (reduced, _) = process_reduction_params(&shape, axes, keep_dims)?;
    let count: usize = shape
        .iter()
        .zip(&reduced)
        .filter(|(_, r)| **r)
        .map(|(&dim, _)| dim)
        .product();

    let summed = sum_op(a, axes, keep_dims)?;
    let scale = full_like(&summed, 1.0 / count as f64)?;
    mul_op(&summed, &scale)
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
