use super::{check_batch_pair, Criterion, Reduction};
use crate::autograd::BackwardOp;
use crate::buffer::CpuBuffer;
use crate::error::ExtGradError;
use crate::ops::attach_grad_fn;
use crate::tensor::Tensor;
use num_traits::Float;
use std::sync::Arc;

/// Cross-entropy between `softmax(input)` and `target`, fused into one node.
///
/// Per sample `loss = sum(t) * logsumexp(z) - sum(t * z)`, which is
/// `-sum(t * log_softmax(z))`. Only the logits receive a gradient:
/// `dz = g * (sum(t) * softmax(z) - t)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyWithSoftmax {
    reduction: Reduction,
}

impl CrossEntropyWithSoftmax {
    pub fn new(reduction: Reduction) -> Self {
        CrossEntropyWithSoftmax { reduction }
    }
}

#[derive(Debug)]
struct CrossEntropyWithSoftmaxBackward {
    logits: Tensor,
    target: Tensor,
}

fn softmax_rows<T: Float>(z: &[T], classes: usize) -> (Vec<T>, Vec<T>) {
    let mut probs = Vec::with_capacity(z.len());
    let mut log_sum_exp = Vec::with_capacity(z.len() / classes);
    for row in z.chunks(classes) {
        let max = row.iter().fold(T::neg_infinity(), |m, &v| m.max(v));
        let sum = row.iter().fold(T::zero(), |acc, &v| acc + (v - max).exp());
        probs.extend(row.iter().map(|&v| (v - max).exp() / sum));
        log_sum_exp.push(max + sum.ln());
    }
    (probs, log_sum_exp)
}

fn forward_kernel<T: Float>(z: &[T], t: &[T], classes: usize) -> Vec<T> {
    let (_, log_sum_exp) = softmax_rows(z, classes);
    z.chunks(classes)
        .zip(t.chunks(classes))
        .zip(log_sum_exp)
        .map(|((z_row, t_row), lse)| {
            let t_sum = t_row.iter().fold(T::zero(), |acc, &v| acc + v);
            let dot = z_row
                .iter()
                .zip(t_row)
                .fold(T::zero(), |acc, (&zv, &tv)| acc + zv * tv);
            t_sum * lse - dot
        })
        .collect()
}

fn backward_kernel<T: Float>(z: &[T], t: &[T], g: &[T], classes: usize) -> Vec<T> {
    let (probs, _) = softmax_rows(z, classes);
    let mut grad = Vec::with_capacity(z.len());
    for ((p_row, t_row), &g_i) in probs.chunks(classes).zip(t.chunks(classes)).zip(g) {
        let t_sum = t_row.iter().fold(T::zero(), |acc, &v| acc + v);
        grad.extend(
            p_row
                .iter()
                .zip(t_row)
                .map(|(&p, &tv)| g_i * (t_sum * p - tv)),
        );
    }
    grad
}

impl BackwardOp for CrossEntropyWithSoftmaxBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        let z = self.logits.read_data();
        let t = self.target.read_data();
        let g = grad_output.read_data();
        let shape = z.shape.clone();
        let classes = shape[1];
        let grad = match (&z.buffer, &t.buffer, &g.buffer) {
            (CpuBuffer::F32(z), CpuBuffer::F32(t), CpuBuffer::F32(g)) => {
                Tensor::new(backward_kernel(z, t, g, classes), shape)?
            }
            (CpuBuffer::F64(z), CpuBuffer::F64(t), CpuBuffer::F64(g)) => {
                Tensor::new_f64(backward_kernel(z, t, g, classes), shape)?
            }
            (z_buf, _, g_buf) => {
                return Err(ExtGradError::DataTypeMismatch {
                    expected: z_buf.dtype(),
                    actual: g_buf.dtype(),
                    operation: "cross_entropy_with_softmax backward".to_string(),
                })
            }
        };
        Ok(vec![grad])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.logits.clone()]
    }
}

impl Criterion for CrossEntropyWithSoftmax {
    fn name(&self) -> &str {
        "cross_entropy_with_softmax"
    }

    fn calculate(&self, input: &Tensor, target: &Tensor) -> Result<Tensor, ExtGradError> {
        let (batch, classes) = check_batch_pair(input, target, self.name())?;
        let z = input.read_data();
        let t = target.read_data();
        let per_sample = match (&z.buffer, &t.buffer) {
            (CpuBuffer::F32(z), CpuBuffer::F32(t)) => {
                Tensor::new(forward_kernel(z, t, classes), vec![batch])?
            }
            (CpuBuffer::F64(z), CpuBuffer::F64(t)) => {
                Tensor::new_f64(forward_kernel(z, t, classes), vec![batch])?
            }
            (z_buf, t_buf) => {
                return Err(ExtGradError::DataTypeMismatch {
                    expected: z_buf.dtype(),
                    actual: t_buf.dtype(),
                    operation: self.name().to_string(),
                })
            }
        };
        let requires_grad = z.requires_grad;
        drop(z);
        drop(t);

        attach_grad_fn(&per_sample, requires_grad, || {
            Arc::new(CrossEntropyWithSoftmaxBackward {
                logits: input.clone(),
                target: target.detach(),
            })
        });
        self.reduction.apply(per_sample)
    }
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
