use crate::device::StorageDevice;
use crate::error::ExtGradError;
use crate::function::user_function::{
    GradientSlots, OutputSlots, RootGradients, UserFunction, VariableSpec,
};
use crate::ops::arithmetic::{add_op, div_op, mul_op, neg_op, sub_op};
use crate::ops::math_elem::exp_op;
use crate::tensor::{ones_like, Tensor};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logistic sigmoid written as a user function.
///
/// Forward computes `s = 1 / (1 + exp(-x))` and keeps `s` as its state.
/// Backward returns `g * s * (1 - s)` from that state.
#[derive(Debug, Default)]
pub struct UserSigmoid {
    forward_calls: AtomicUsize,
    backward_calls: AtomicUsize,
}

impl UserSigmoid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward_calls(&self) -> usize {
        self.forward_calls.load(Ordering::Relaxed)
    }

    pub fn backward_calls(&self) -> usize {
        self.backward_calls.load(Ordering::Relaxed)
    }
}

impl UserFunction for UserSigmoid {
    /// The forward output.
    type State = Tensor;

    fn name(&self) -> &str {
        "UserSigmoid"
    }

    fn infer_output(&self, inputs: &[VariableSpec]) -> Result<VariableSpec, ExtGradError> {
        match inputs {
            [input] => Ok(input.clone()),
            _ => Err(ExtGradError::InvalidArity {
                function: self.name().to_string(),
                expected: 1,
                actual: inputs.len(),
            }),
        }
    }

    fn forward(
        &self,
        inputs: &[Tensor],
        outputs: &mut OutputSlots,
        _device: StorageDevice,
        _outputs_to_retain: &BTreeSet<usize>,
    ) -> Result<Self::State, ExtGradError> {
        self.forward_calls.fetch_add(1, Ordering::Relaxed);
        let x = match inputs {
            [x] => x,
            _ => {
                return Err(ExtGradError::InvalidArity {
                    function: self.name().to_string(),
                    expected: 1,
                    actual: inputs.len(),
                })
            }
        };

        let one = ones_like(x)?;
        let denominator = add_op(&one, &exp_op(&neg_op(x)?)?)?;
        let s = div_op(&one, &denominator)?;

        for slot in outputs.values_mut() {
            *slot = Some(s.clone());
        }
        Ok(s)
    }

    fn backward(
        &self,
        state: Self::State,
        root_gradients: &RootGradients,
        variables: &mut GradientSlots,
    ) -> Result<(), ExtGradError> {
        self.backward_calls.fetch_add(1, Ordering::Relaxed);
        let grad_output = root_gradients.get(&0).ok_or_else(|| {
            ExtGradError::BackwardError(format!("{}: missing root gradient for output 0", self.name()))
        })?;

        let s = state;
        let one_minus_s = sub_op(&ones_like(&s)?, &s)?;
        let grad_input = mul_op(&mul_op(grad_output, &s)?, &one_minus_s)?;

        for slot in variables.values_mut() {
            *slot = Some(grad_input.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
