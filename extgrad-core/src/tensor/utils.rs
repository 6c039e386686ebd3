/// Calculates contiguous row-major strides for a shape.
///
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Converts a flat row-major index into coordinates.
pub fn index_to_coord(index: usize, shape: &[usize]) -> Vec<usize> {
    let mut coord = vec![0; shape.len()];
    let mut remaining = index;
    for dim in (0..shape.len()).rev() {
        let size = shape[dim];
        if size == 0 {
            return vec![0; shape.len()];
        }
        coord[dim] = remaining % size;
        remaining /= size;
    }
    coord
}

/// Maps coordinates in a broadcast output back to a flat index in an input of
/// `original_shape`. Leading dimensions missing from the input are skipped and
/// size-1 dimensions always read index 0.
pub fn coord_to_index_broadcasted(
    target_coord: &[usize],
    original_shape: &[usize],
    original_strides: &[usize],
) -> usize {
    let rank_diff = target_coord.len().saturating_sub(original_shape.len());
    let mut index = 0;
    for i in 0..original_shape.len() {
        let effective_coord = if original_shape[i] == 1 {
            0
        } else {
            target_coord[rank_diff + i]
        };
        index += effective_coord * original_strides[i];
    }
    index
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
