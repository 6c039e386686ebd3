use crate::error::ExtGradError;
use crate::tensor::{uniform, Tensor};
use crate::types::DType;
use rand::Rng;

/// Computes `(fan_in, fan_out)` for a weight of shape `[fan_out, fan_in]`.
pub fn calculate_fan_in_and_fan_out(shape: &[usize]) -> Result<(usize, usize), ExtGradError> {
    match shape {
        [fan_out, fan_in] => Ok((*fan_in, *fan_out)),
        _ => Err(ExtGradError::RankMismatch {
            expected: 2,
            actual: shape.len(),
        }),
    }
}

/// Samples a Glorot (Xavier) uniform weight of shape `[fan_out, fan_in]`.
///
/// Values are drawn from `U(-a, a)` with `a = sqrt(6 / (fan_in + fan_out))`.
pub fn glorot_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    dtype: DType,
    rng: &mut R,
) -> Result<Tensor, ExtGradError> {
    let (fan_in, fan_out) = calculate_fan_in_and_fan_out(shape)?;
    if fan_in + fan_out == 0 {
        return Err(ExtGradError::InvalidArgument(
            "glorot_uniform requires a non-empty weight".to_string(),
        ));
    }
    let bound = (6.0 / (fan_in + fan_out) as f64).sqrt();
    uniform(shape.to_vec(), -bound, bound, dtype, rng)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
