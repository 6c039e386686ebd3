use crate::error::ExtGradError;
use crate::ops::reduction::sum_op;
use crate::ops::view::reshape_op;
use crate::tensor::Tensor;

/// Determines the shape produced by broadcasting two shapes.
///
/// Follows NumPy rules: shapes are aligned on the right, missing leading
/// dimensions count as 1, and two dimensions are compatible when equal or
/// when one of them is 1.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, ExtGradError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = rank_a.max(rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = if i < rank_a { shape_a[rank_a - 1 - i] } else { 1 };
        let dim_b = if i < rank_b { shape_b[rank_b - 1 - i] } else { 1 };

        result_shape[max_rank - 1 - i] = if dim_a == dim_b || dim_b == 1 {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else {
            return Err(ExtGradError::BroadcastError {
                shape1: shape_a.to_vec(),
                shape2: shape_b.to_vec(),
            });
        };
    }
    Ok(result_shape)
}

impl Tensor {
    /// Sums a gradient down to `target_shape`, undoing a forward broadcast.
    ///
    /// With `A[2,3] + B[3] -> C[2,3]`, the gradient reaching `B` has shape
    /// `[2,3]` and must be summed over axis 0 to become `[3]`.
    pub fn reduce_to_shape(&self, target_shape: &[usize]) -> Result<Tensor, ExtGradError> {
        let current_shape = self.shape();
        if current_shape == target_shape {
            return Ok(self.clone());
        }

        let current_rank = current_shape.len();
        let target_rank = target_shape.len();
        if current_rank < target_rank {
            return Err(ExtGradError::InternalError(format!(
                "Cannot reduce shape {:?} to target {:?}: current rank < target rank.",
                current_shape, target_shape
            )));
        }

        let rank_diff = current_rank - target_rank;
        let mut axes_to_reduce: Vec<usize> = (0..rank_diff).collect();
        for i in 0..target_rank {
            let current_dim = current_shape[rank_diff + i];
            let target_dim = target_shape[i];
            if current_dim != target_dim {
                if target_dim == 1 {
                    axes_to_reduce.push(rank_diff + i);
                } else {
                    return Err(ExtGradError::InternalError(format!(
                        "Cannot reduce shape {:?} to target {:?}: incompatible dim {} ({} vs {}).",
                        current_shape, target_shape, i, current_dim, target_dim
                    )));
                }
            }
        }

        let summed = sum_op(self, Some(axes_to_reduce.as_slice()), false)?;
        // Leading axes are gone; size-1 axes that were summed must come back.
        reshape_op(&summed, target_shape.to_vec())
    }
}

#[cfg(test)]
#[path = "broadcast_utils_test.rs"]
mod tests;
