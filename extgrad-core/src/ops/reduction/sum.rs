use super::utils::{keep_dims_shape, process_reduction_params};
use crate::autograd::BackwardOp;
use crate::buffer::CpuBuffer;
use crate::error::ExtGradError;
use crate::ops::arithmetic::add_op;
use crate::ops::view::reshape_op;
use crate::tensor::utils::{calculate_strides, index_to_coord};
use crate::tensor::{zeros_like, Tensor};
use num_traits::Float;
use std::sync::Arc;

/// Backward pass for `sum`: the incoming gradient is broadcast back over the
/// reduced axes.
#[derive(Debug)]
struct SumBackward {
    a: Tensor,
    keep_dims_shape: Vec<usize>,
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        let grad = reshape_op(grad_output, self.keep_dims_shape.clone())?;
        let zeros = zeros_like(&self.a.detach())?;
        Ok(vec![add_op(&zeros, &grad)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }
}

fn sum_kernel<T: Float>(
    data: &[T],
    input_shape: &[usize],
    reduced: &[bool],
    kept_shape: &[usize],
) -> Vec<T> {
    let kept_strides = calculate_strides(kept_shape);
    let out_numel: usize = kept_shape.iter().product();
    let mut out = vec![T::zero(); out_numel];
    for (i, &v) in data.iter().enumerate() {
        let coord = index_to_coord(i, input_shape);
        let out_index: usize = coord
            .iter()
            .zip(reduced)
            .zip(&kept_strides)
            .map(|((&c, &r), &s)| if r { 0 } else { c * s })
            .sum();
        out[out_index] = out[out_index] + v;
    }
    out
}

/// Sums the elements of `a` over `axes` (every axis when `None`).
///
/// With `keep_dims`, reduced axes stay in the shape with size 1. An empty
/// axis list returns a copy.
///
/// # Errors
/// Returns `InvalidArgument` if an axis is out of range.
pub fn sum_op(a: &Tensor, axes: Option<&[usize]>, keep_dims: bool) -> Result<Tensor, ExtGradError> {
    let guard = a.read_data();
    let (reduced, output_shape) = process_reduction_params(&guard.shape, axes, keep_dims)?;
    let kept_shape = keep_dims_shape(&guard.shape, &reduced);
    let requires_grad = guard.requires_grad;

    let output = match &guard.buffer {
        CpuBuffer::F32(data) => Tensor::new(
            sum_kernel(data, &guard.shape, &reduced, &kept_shape),
            output_shape,
        )?,
        CpuBuffer::F64(data) => Tensor::new_f64(
            sum_kernel(data, &guard.shape, &reduced, &kept_shape),
            output_shape,
        )?,
    };
    drop(guard);

    crate::ops::attach_grad_fn(&output, requires_grad, || {
        Arc::new(SumBackward {
            a: a.clone(),
            keep_dims_shape: kept_shape,
        })
    });
    Ok(output)
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
