use crate::error::ExtGradError;
use crate::model::Sequential;
use crate::nn::layers::Linear;
use crate::nn::module::Module;
use rand::Rng;

/// Builds a fully connected classifier.
///
/// The network has `num_hidden_layers` blocks of `Linear(in, hidden_dim)`
/// followed by a fresh module from `nonlinearity`, then a final
/// `Linear(hidden_dim, num_classes)` with no activation. Children are named
/// `dense0`, `act0`, `dense1`, `act1`, ..., `output`.
///
/// Weights are Glorot-uniform draws from `rng`, biases start at zero, so the
/// same seed always yields the same network.
///
/// # Errors
/// Returns `InvalidArgument` if `num_hidden_layers` is zero or any dimension
/// is zero.
pub fn fully_connected_classifier<R, N>(
    input_dim: usize,
    num_classes: usize,
    hidden_dim: usize,
    num_hidden_layers: usize,
    mut nonlinearity: N,
    rng: &mut R,
) -> Result<Sequential, ExtGradError>
where
    R: Rng + ?Sized,
    N: FnMut() -> Box<dyn Module>,
{
    if num_hidden_layers == 0 {
        return Err(ExtGradError::InvalidArgument(
            "a classifier needs at least one hidden layer".to_string(),
        ));
    }
    if input_dim == 0 || num_classes == 0 || hidden_dim == 0 {
        return Err(ExtGradError::InvalidArgument(format!(
            "classifier dimensions must be non-zero (input {}, hidden {}, classes {})",
            input_dim, hidden_dim, num_classes
        )));
    }

    let mut model = Sequential::new();
    let mut in_features = input_dim;
    for i in 0..num_hidden_layers {
        let dense = Linear::new(in_features, hidden_dim, true, rng)?;
        model.add_module(&format!("dense{}", i), Box::new(dense))?;
        model.add_module(&format!("act{}", i), nonlinearity())?;
        in_features = hidden_dim;
    }
    let output = Linear::new(hidden_dim, num_classes, true, rng)?;
    model.add_module("output", Box::new(output))?;

    log::debug!(
        "built classifier {} -> {}x{} -> {} ({} parameter tensors)",
        input_dim,
        num_hidden_layers,
        hidden_dim,
        num_classes,
        model.parameters().len()
    );
    Ok(model)
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
