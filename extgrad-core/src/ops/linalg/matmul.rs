use crate::autograd::BackwardOp;
use crate::buffer::CpuBuffer;
use crate::error::ExtGradError;
use crate::ops::linalg::transpose_op;
use crate::tensor::Tensor;
use num_traits::Float;
use std::sync::Arc;

/// Backward pass for `C = A @ B`: `dA = G @ B^T`, `dB = A^T @ G`.
#[derive(Debug)]
struct MatmulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        let a = self.a.detach();
        let b = self.b.detach();
        let grad_a = matmul_op(grad_output, &transpose_op(&b)?)?;
        let grad_b = matmul_op(&transpose_op(&a)?, grad_output)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

fn matmul_kernel<T: Float>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            let out_row = &mut out[i * n..(i + 1) * n];
            for (o, &b_pj) in out_row.iter_mut().zip(b_row) {
                *o = *o + a_ip * b_pj;
            }
        }
    }
    out
}

/// Matrix product of two 2-D tensors `[m, k] @ [k, n] -> [m, n]`.
///
/// # Errors
/// * `RankMismatch` if either input is not 2-D.
/// * `ShapeMismatch` if the inner dimensions differ.
/// * `DataTypeMismatch` for mixed dtypes.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, ExtGradError> {
    let a_guard = a.read_data();
    let b_guard = b.read_data();

    for guard in [&a_guard, &b_guard] {
        if guard.shape.len() != 2 {
            return Err(ExtGradError::RankMismatch {
                expected: 2,
                actual: guard.shape.len(),
            });
        }
    }
    let (m, k) = (a_guard.shape[0], a_guard.shape[1]);
    let (k2, n) = (b_guard.shape[0], b_guard.shape[1]);
    if k != k2 {
        return Err(ExtGradError::ShapeMismatch {
            expected: format!("[{}, _] for the right operand", k),
            actual: format!("{:?}", b_guard.shape),
            operation: "matmul_op".to_string(),
        });
    }
    let requires_grad = a_guard.requires_grad || b_guard.requires_grad;

    let output = match (&a_guard.buffer, &b_guard.buffer) {
        (CpuBuffer::F32(a_data), CpuBuffer::F32(b_data)) => {
            Tensor::new(matmul_kernel(a_data, b_data, m, k, n), vec![m, n])?
        }
        (CpuBuffer::F64(a_data), CpuBuffer::F64(b_data)) => {
            Tensor::new_f64(matmul_kernel(a_data, b_data, m, k, n), vec![m, n])?
        }
        (a_buf, b_buf) => {
            return Err(ExtGradError::DataTypeMismatch {
                expected: a_buf.dtype(),
                actual: b_buf.dtype(),
                operation: "matmul_op".to_string(),
            })
        }
    };
    drop(a_guard);
    drop(b_guard);

    crate::ops::attach_grad_fn(&output, requires_grad, || {
        Arc::new(MatmulBackward {
            a: a.clone(),
            b: b.clone(),
        })
    });
    Ok(output)
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
