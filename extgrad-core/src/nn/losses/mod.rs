//! Loss and evaluation criteria.

pub mod classification_error;
pub mod cross_entropy;

use crate::error::ExtGradError;
use crate::ops::reduction::{mean_op, sum_op};
use crate::tensor::Tensor;

pub use classification_error::ClassificationError;
pub use cross_entropy::CrossEntropyWithSoftmax;

/// How per-sample values are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Keep one value per sample, shape `[batch]`.
    #[default]
    None,
    Mean,
    Sum,
}

impl Reduction {
    pub(crate) fn apply(&self, per_sample: Tensor) -> Result<Tensor, ExtGradError> {
        match self {
            Reduction::None => Ok(per_sample),
            Reduction::Mean => mean_op(&per_sample, None, false),
            Reduction::Sum => sum_op(&per_sample, None, false),
        }
    }
}

/// Compares a batch of predictions with a batch of targets.
pub trait Criterion: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// `input` and `target` are both `[batch, num_classes]`.
    fn calculate(&self, input: &Tensor, target: &Tensor) -> Result<Tensor, ExtGradError>;
}

/// Checks that `input` and `target` are matching `[batch, classes]` tensors
/// with at least one class.
pub(crate) fn check_batch_pair(
    input: &Tensor,
    target: &Tensor,
    operation: &str,
) -> Result<(usize, usize), ExtGradError> {
    let shape = input.shape();
    if shape.len() != 2 {
        return Err(ExtGradError::RankMismatch {
            expected: 2,
            actual: shape.len(),
        });
    }
    if shape[1] == 0 {
        return Err(ExtGradError::InvalidArgument(format!(
            "{} needs at least one class, got shape {:?}",
            operation, shape
        )));
    }
    if target.shape() != shape {
        return Err(ExtGradError::ShapeMismatch {
            expected: format!("{:?}", shape),
            actual: format!("{:?}", target.shape()),
            operation: operation.to_string(),
        });
    }
    if target.dtype() != input.dtype() {
        return Err(ExtGradError::DataTypeMismatch {
            expected: input.dtype(),
            actual: target.dtype(),
            operation: operation.to_string(),
        });
    }
    Ok((shape[0], shape[1]))
}
