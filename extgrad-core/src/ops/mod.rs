//! # Tensor operations
//!
//! Each operation has a core `xxx_op` function that computes the forward
//! result and, when any input requires a gradient, attaches a `XxxBackward`
//! node implementing [`BackwardOp`](crate::autograd::BackwardOp).
//!
//! - [`arithmetic`]: broadcasting add, sub, mul, div and negation.
//! - [`math_elem`]: element-wise `exp`.
//! - [`activation`]: sigmoid.
//! - [`linalg`]: 2-D matmul and transpose.
//! - [`reduction`]: sum and mean over axes.
//! - [`view`]: reshape.
//!
//! Storage is always contiguous, so kernels iterate flat buffers.

use crate::autograd::BackwardOp;
use crate::buffer::CpuBuffer;
use crate::error::ExtGradError;
use crate::tensor::broadcast_utils::broadcast_shapes;
use crate::tensor::utils::{calculate_strides, coord_to_index_broadcasted, index_to_coord};
use crate::tensor::Tensor;
use std::sync::Arc;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod view;

/// Marks `output` as produced by `grad_fn` when any input requires a gradient.
pub(crate) fn attach_grad_fn(
    output: &Tensor,
    requires_grad: bool,
    build: impl FnOnce() -> Arc<dyn BackwardOp>,
) {
    if requires_grad {
        let grad_fn = build();
        let mut guard = output.write_data();
        guard.grad_fn = Some(grad_fn);
        guard.requires_grad = true;
    }
}

/// Applies a unary element-wise operation to a tensor.
///
/// Handles dtype dispatch, output creation and autograd setup. The
/// `backward_builder` receives the input handle and a detached copy of the
/// output, for backward passes expressed in terms of the result.
pub(crate) fn apply_unary_op<F32Op, F64Op, B>(
    a: &Tensor,
    op_f32: F32Op,
    op_f64: F64Op,
    backward_builder: B,
    op_name: &str,
) -> Result<Tensor, ExtGradError>
where
    F32Op: Fn(f32) -> f32,
    F64Op: Fn(f64) -> f64,
    B: FnOnce(Tensor, Tensor) -> Arc<dyn BackwardOp>,
{
    let a_guard = a.read_data();
    let requires_grad = a_guard.requires_grad;
    let output_shape = a_guard.shape.clone();

    let output = match &a_guard.buffer {
        CpuBuffer::F32(data) => {
            let out: Vec<f32> = data.iter().map(|&v| op_f32(v)).collect();
            Tensor::new(out, output_shape)?
        }
        CpuBuffer::F64(data) => {
            let out: Vec<f64> = data.iter().map(|&v| op_f64(v)).collect();
            Tensor::new_f64(out, output_shape)?
        }
    };
    drop(a_guard);

    log::trace!("{}: shape {:?}", op_name, output.shape());
    attach_grad_fn(&output, requires_grad, || {
        backward_builder(a.clone(), output.detach())
    });
    Ok(output)
}

/// Applies a broadcasting binary element-wise operation.
///
/// Both inputs must share a dtype. The `backward_builder` receives both input
/// handles and a detached copy of the output.
pub(crate) fn apply_binary_op<F32Op, F64Op, B>(
    a: &Tensor,
    b: &Tensor,
    op_f32: F32Op,
    op_f64: F64Op,
    backward_builder: B,
    op_name: &str,
) -> Result<Tensor, ExtGradError>
where
    F32Op: Fn(f32, f32) -> f32,
    F64Op: Fn(f64, f64) -> f64,
    B: FnOnce(Tensor, Tensor, Tensor) -> Arc<dyn BackwardOp>,
{
    let a_guard = a.read_data();
    let b_guard = b.read_data();

    if a_guard.device != b_guard.device {
        return Err(ExtGradError::DeviceMismatch {
            expected: a_guard.device,
            actual: b_guard.device,
            operation: op_name.to_string(),
        });
    }

    let output_shape = broadcast_shapes(&a_guard.shape, &b_guard.shape)?;
    let requires_grad = a_guard.requires_grad || b_guard.requires_grad;

    let output = match (&a_guard.buffer, &b_guard.buffer) {
        (CpuBuffer::F32(a_data), CpuBuffer::F32(b_data)) => {
            let out = broadcast_kernel(
                a_data, &a_guard.shape, b_data, &b_guard.shape, &output_shape, &op_f32,
            );
            Tensor::new(out, output_shape)?
        }
        (CpuBuffer::F64(a_data), CpuBuffer::F64(b_data)) => {
            let out = broadcast_kernel(
                a_data, &a_guard.shape, b_data, &b_guard.shape, &output_shape, &op_f64,
            );
            Tensor::new_f64(out, output_shape)?
        }
        (a_buf, b_buf) => {
            return Err(ExtGradError::DataTypeMismatch {
                expected: a_buf.dtype(),
                actual: b_buf.dtype(),
                operation: op_name.to_string(),
            })
        }
    };
    drop(a_guard);
    drop(b_guard);

    log::trace!("{}: shape {:?}", op_name, output.shape());
    attach_grad_fn(&output, requires_grad, || {
        backward_builder(a.clone(), b.clone(), output.detach())
    });
    Ok(output)
}

fn broadcast_kernel<T: Copy>(
    a: &[T],
    a_shape: &[usize],
    b: &[T],
    b_shape: &[usize],
    output_shape: &[usize],
    op: &impl Fn(T, T) -> T,
) -> Vec<T> {
    let numel: usize = output_shape.iter().product();
    if a_shape == b_shape {
        return a.iter().zip(b.iter()).map(|(&x, &y)| op(x, y)).collect();
    }
    let a_strides = calculate_strides(a_shape);
    let b_strides = calculate_strides(b_shape);
    (0..numel)
        .map(|i| {
            let coord = index_to_coord(i, output_shape);
            let ai = coord_to_index_broadcasted(&coord, a_shape, &a_strides);
            let bi = coord_to_index_broadcasted(&coord, b_shape, &b_strides);
            op(a[ai], b[bi])
        })
        .collect()
}
