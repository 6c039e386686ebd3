use crate::autograd::BackwardOp;
use crate::buffer::CpuBuffer;
use crate::error::ExtGradError;
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct TransposeBackward {
    a: Tensor,
}

impl BackwardOp for TransposeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        Ok(vec![transpose_op(grad_output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }
}

fn transpose_kernel<T: Copy>(data: &[T], rows: usize, cols: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(rows * cols);
    for j in 0..cols {
        for i in 0..rows {
            out.push(data[i * cols + j]);
        }
    }
    out
}

/// Swaps the axes of a 2-D tensor. The result is a contiguous copy.
///
/// # Errors
/// Returns `RankMismatch` if the input is not 2-D.
pub fn transpose_op(a: &Tensor) -> Result<Tensor, ExtGradError> {
    let guard = a.read_data();
    if guard.shape.len() != 2 {
        return Err(ExtGradError::RankMismatch {
            expected: 2,
            actual: guard.shape.len(),
        });
    }
    let (rows, cols) = (guard.shape[0], guard.shape[1]);
    let requires_grad = guard.requires_grad;
    let output = match &guard.buffer {
        CpuBuffer::F32(data) => Tensor::new(transpose_kernel(data, rows, cols), vec![cols, rows])?,
        CpuBuffer::F64(data) => {
            Tensor::new_f64(transpose_kernel(data, rows, cols), vec![cols, rows])?
        }
    };
    drop(guard);

    crate::ops::attach_grad_fn(&output, requires_grad, || {
        Arc::new(TransposeBackward { a: a.clone() })
    });
    Ok(output)
}

#[cfg(test)]
#[path = "transpose_test.rs"]
mod tests;
