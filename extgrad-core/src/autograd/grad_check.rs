use crate::error::ExtGradError;
use crate::tensor::Tensor;
use crate::types::DType;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad} != numerical {numerical_grad} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(ExtGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(ExtGradError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(ExtGradError),
    #[error("Input {input_index} requires grad but has no gradient after the backward pass")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is not finite for input {input_index}, element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Gradient check input {input_index} must be a leaf tensor")]
    InputNotLeaf { input_index: usize },
    #[error("Output gradient shape {actual:?} does not match output shape {expected:?}")]
    OutputGradShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

impl From<ExtGradError> for GradCheckError {
    fn from(err: ExtGradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// The scalar being differentiated is `sum(func(inputs) * output_grad)`, so the
/// analytical side is `func(inputs).backward_with_grad(output_grad)`. Only
/// inputs with `requires_grad` set are checked. A component passes when
/// `|analytical - numerical| <= tolerance * (1 + |numerical|)`.
///
/// Inputs are never mutated: each perturbation runs `func` on fresh copies.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, ExtGradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
    }

    // Analytical gradients on fresh leaves so the caller's tensors keep no grad.
    let leaves: Vec<Tensor> = inputs
        .iter()
        .map(|t| {
            let leaf = t.deep_clone()?;
            leaf.set_requires_grad(t.requires_grad())?;
            Ok(leaf)
        })
        .collect::<Result<_, ExtGradError>>()?;

    let output = func(&leaves).map_err(GradCheckError::ForwardPassError)?;
    if output.shape() != output_grad.shape() {
        return Err(GradCheckError::OutputGradShapeMismatch {
            expected: output.shape(),
            actual: output_grad.shape(),
        });
    }
    output
        .backward_with_grad(output_grad.clone())
        .map_err(GradCheckError::BackwardPassError)?;

    let weights = output_grad.to_f64_vec()?;

    for (input_index, leaf) in leaves.iter().enumerate() {
        if !leaf.requires_grad() {
            continue;
        }
        let analytical = leaf
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index })?
            .to_f64_vec()?;
        let base = leaf.to_f64_vec()?;

        for element_index in 0..base.len() {
            let loss_plus = perturbed_loss(&func, &leaves, input_index, element_index, epsilon, &weights)?;
            let loss_minus = perturbed_loss(&func, &leaves, input_index, element_index, -epsilon, &weights)?;
            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical_grad = analytical[element_index];
            let difference = (analytical_grad - numerical).abs();
            if difference > tolerance * (1.0 + numerical.abs()) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical_grad,
                    numerical_grad: numerical,
                    difference,
                });
            }
        }
    }
    Ok(())
}

fn perturbed_loss<F>(
    func: &F,
    leaves: &[Tensor],
    input_index: usize,
    element_index: usize,
    delta: f64,
    weights: &[f64],
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, ExtGradError>,
{
    let perturbed: Vec<Tensor> = leaves
        .iter()
        .enumerate()
        .map(|(i, t)| {
            if i != input_index {
                return Ok(t.detach());
            }
            let shape = t.shape();
            match t.dtype() {
                DType::F32 => {
                    let mut data = t.get_f32_data()?;
                    data[element_index] += delta as f32;
                    Tensor::new(data, shape)
                }
                DType::F64 => {
                    let mut data = t.get_f64_data()?;
                    data[element_index] += delta;
                    Tensor::new_f64(data, shape)
                }
            }
        })
        .collect::<Result<_, ExtGradError>>()?;

    let output = func(&perturbed).map_err(GradCheckError::ForwardPassError)?;
    let values = output.to_f64_vec()?;
    Ok(values.iter().zip(weights).map(|(v, w)| v * w).sum())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
