use crate::error::ExtGradError;

/// Resolves the axes to reduce and the output shape of a reduction.
///
/// `None` reduces every axis. Duplicate axes are collapsed.
pub(super) fn process_reduction_params(
    input_shape: &[usize],
    axes: Option<&[usize]>,
    keep_dims: bool,
) -> Result<(Vec<bool>, Vec<usize>), ExtGradError> {
    let rank = input_shape.len();
    let mut reduced = vec![axes.is_none(); rank];
    if let Some(axes) = axes {
        for &axis in axes {
            if axis >= rank {
                return Err(ExtGradError::InvalidArgument(format!(
                    "reduction axis {} out of range for rank {}",
                    axis, rank
                )));
            }
            reduced[axis] = true;
        }
    }

    let output_shape = input_shape
        .iter()
        .zip(&reduced)
        .filter_map(|(&dim, &r)| match (r, keep_dims) {
            (false, _) => Some(dim),
            (true, true) => Some(1),
            (true, false) => None,
        })
        .collect();
    Ok((reduced, output_shape))
}

/// Output shape of a reduction with `keep_dims = true`.
pub(super) fn keep_dims_shape(input_shape: &[usize], reduced: &[bool]) -> Vec<usize> {
    input_shape
        .iter()
        .zip(reduced)
        .map(|(&dim, &r)| if r { 1 } else { dim })
        .collect()
}
