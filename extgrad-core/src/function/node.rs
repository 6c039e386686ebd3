use crate::autograd::BackwardOp;
use crate::error::ExtGradError;
use crate::function::user_function::{GradientSlots, OutputSlots, RootGradients, UserFunction, VariableSpec};
use crate::ops::attach_grad_fn;
use crate::tensor::Tensor;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Graph node recorded for one application of a [`UserFunction`].
///
/// Holds the forward state until the first backward takes it.
struct UserFunctionBackward<F: UserFunction> {
    function: Arc<F>,
    state: Mutex<Option<F::State>>,
    /// Inputs that required a gradient, with their position in the call.
    inputs: Vec<(usize, Tensor)>,
}

impl<F: UserFunction> fmt::Debug for UserFunctionBackward<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<usize> = self.inputs.iter().map(|(i, _)| *i).collect();
        f.debug_struct("UserFunctionBackward")
            .field("function", &self.function.name())
            .field("inputs", &indices)
            .finish()
    }
}

impl<F: UserFunction> UserFunctionBackward<F> {
    fn take_state(&self) -> Result<F::State, ExtGradError> {
        let mut guard = self.state.lock().map_err(|e| ExtGradError::LockError {
            lock_type: "mutex".to_string(),
            reason: e.to_string(),
        })?;
        guard.take().ok_or_else(|| ExtGradError::StateConsumed {
            function: self.function.name().to_string(),
        })
    }
}

impl<F: UserFunction> BackwardOp for UserFunctionBackward<F> {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
        let state = self.take_state()?;
        let name = self.function.name();

        let root_gradients: RootGradients = BTreeMap::from([(0, grad_output.detach())]);
        let mut variables: GradientSlots = self.inputs.iter().map(|(i, _)| (*i, None)).collect();

        log::debug!("{}: backward for inputs {:?}", name, variables.keys().collect::<Vec<_>>());
        self.function.backward(state, &root_gradients, &mut variables)?;

        self.inputs
            .iter()
            .map(|(index, input)| {
                let grad = variables.remove(index).flatten().ok_or_else(|| {
                    ExtGradError::GradientNotPopulated {
                        function: name.to_string(),
                        index: *index,
                    }
                })?;
                if grad.shape() != input.shape() {
                    return Err(ExtGradError::ShapeMismatch {
                        expected: format!("{:?}", input.shape()),
                        actual: format!("{:?}", grad.shape()),
                        operation: format!("{} backward, input {}", name, index),
                    });
                }
                if grad.dtype() != input.dtype() {
                    return Err(ExtGradError::DataTypeMismatch {
                        expected: input.dtype(),
                        actual: grad.dtype(),
                        operation: format!("{} backward, input {}", name, index),
                    });
                }
                Ok(grad)
            })
            .collect()
    }

    fn inputs(&self) -> Vec<Tensor> {
        self.inputs.iter().map(|(_, t)| t.clone()).collect()
    }
}

/// Runs `function` on `inputs` and records it in the graph.
///
/// The function sees detached inputs and one empty output slot. After
/// `forward` the filled output is checked against
/// [`UserFunction::infer_output`]. If any input requires a gradient, the
/// returned tensor gets a `grad_fn` that calls [`UserFunction::backward`] with
/// the state returned by this forward.
///
/// # Errors
/// * Whatever `infer_output` or `forward` return, unchanged.
/// * `OutputNotPopulated` if `forward` left the output slot empty.
/// * `ShapeMismatch` / `DataTypeMismatch` if the output disagrees with the
///   declared spec.
/// * `DeviceMismatch` if the inputs live on different devices.
pub fn apply_user_function<F: UserFunction>(
    function: &Arc<F>,
    inputs: &[Tensor],
) -> Result<Tensor, ExtGradError> {
    let name = function.name();
    let specs: Vec<VariableSpec> = inputs.iter().map(VariableSpec::of).collect();
    let declared = function.infer_output(&specs)?;

    let device = inputs.first().map(|t| t.device()).unwrap_or_default();
    if let Some(other) = inputs.iter().map(|t| t.device()).find(|d| *d != device) {
        return Err(ExtGradError::DeviceMismatch {
            expected: device,
            actual: other,
            operation: name.to_string(),
        });
    }

    let requires_grad = inputs.iter().any(|t| t.requires_grad());
    let outputs_to_retain: BTreeSet<usize> = if requires_grad {
        BTreeSet::from([0])
    } else {
        BTreeSet::new()
    };
    let detached: Vec<Tensor> = inputs.iter().map(|t| t.detach()).collect();
    let mut outputs: OutputSlots = BTreeMap::from([(0, None)]);

    log::debug!("{}: forward on {} input(s)", name, inputs.len());
    let state = function.forward(&detached, &mut outputs, device, &outputs_to_retain)?;

    let output = outputs
        .remove(&0)
        .flatten()
        .ok_or_else(|| ExtGradError::OutputNotPopulated {
            function: name.to_string(),
            index: 0,
        })?;
    if output.shape() != declared.shape {
        return Err(ExtGradError::ShapeMismatch {
            expected: format!("{:?}", declared.shape),
            actual: format!("{:?}", output.shape()),
            operation: format!("{} forward", name),
        });
    }
    if output.dtype() != declared.dtype {
        return Err(ExtGradError::DataTypeMismatch {
            expected: declared.dtype,
            actual: output.dtype(),
            operation: format!("{} forward", name),
        });
    }

    // A fresh node: the function may have returned one of its inputs.
    let output = output.detach();
    attach_grad_fn(&output, requires_grad, || {
        let recorded = inputs
            .iter()
            .enumerate()
            .filter(|(_, t)| t.requires_grad())
            .map(|(i, t)| (i, t.clone()))
            .collect();
        Arc::new(UserFunctionBackward {
            function: Arc::clone(function),
            state: Mutex::new(Some(state)),
            inputs: recorded,
        })
    });
    Ok(output)
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
