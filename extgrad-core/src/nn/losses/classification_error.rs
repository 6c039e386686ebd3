use super::{check_batch_pair, Criterion, Reduction};
use crate::error::ExtGradError;
use crate::tensor::Tensor;

/// 1 for every sample whose highest-scoring class differs from the target's
/// highest entry, 0 otherwise. Ties resolve to the lowest index.
///
/// Not differentiable: the result never records a graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationError {
    reduction: Reduction,
}

impl ClassificationError {
    pub fn new(reduction: Reduction) -> Self {
        ClassificationError { reduction }
    }
}

fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in row.iter().enumerate() {
        if v > row[best] {
            best = i;
        }
    }
    best
}

impl Criterion for ClassificationError {
    fn name(&self) -> &str {
        "classification_error"
    }

    fn calculate(&self, input: &Tensor, target: &Tensor) -> Result<Tensor, ExtGradError> {
        let (batch, classes) = check_batch_pair(input, target, self.name())?;
        let z = input.to_f64_vec()?;
        let t = target.to_f64_vec()?;
        let errors: Vec<f64> = z
            .chunks(classes)
            .zip(t.chunks(classes))
            .map(|(z_row, t_row)| if argmax(z_row) == argmax(t_row) { 0.0 } else { 1.0 })
            .collect();

        let per_sample = match input.dtype() {
            crate::types::DType::F32 => {
                Tensor::new(errors.into_iter().map(|v| v as f32).collect(), vec![batch])?
            }
            crate::types::DType::F64 => Tensor::new_f64(errors, vec![batch])?,
        };
        self.reduction.apply(per_sample)
    }
}

#[cfg(test)]
#[path = "classification_error_test.rs"]
mod tests;
