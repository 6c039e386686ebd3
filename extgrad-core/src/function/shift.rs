use crate::device::StorageDevice;
use crate::error::ExtGradError;
use crate::function::user_function::{
    GradientSlots, OutputSlots, RootGradients, UserFunction, VariableSpec,
};
use crate::ops::arithmetic::add_op;
use crate::tensor::{full_like, Tensor};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Adds a constant to every element: `y = x + offset`.
///
/// The derivative with respect to `x` is 1, so backward passes the incoming
/// gradient through unchanged.
#[derive(Debug)]
pub struct PlusShift {
    offset: f64,
    forward_calls: AtomicUsize,
    backward_calls: AtomicUsize,
}

impl PlusShift {
    pub fn new(offset: f64) -> Self {
        PlusShift {
            offset,
            forward_calls: AtomicUsize::new(0),
            backward_calls: AtomicUsize::new(0),
        }
    }

    /// `x + 3`.
    pub fn plus_three() -> Self {
        Self::new(3.0)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn forward_calls(&self) -> usize {
        self.forward_calls.load(Ordering::Relaxed)
    }

    pub fn backward_calls(&self) -> usize {
        self.backward_calls.load(Ordering::Relaxed)
    }

    fn arity_error(&self, actual: usize) -> ExtGradError {
        ExtGradError::InvalidArity {
            function: self.name().to_string(),
            expected: 1,
            actual,
        }
    }
}

impl UserFunction for PlusShift {
    type State = ();

    fn name(&self) -> &str {
        "PlusShift"
    }

    fn infer_output(&self, inputs: &[VariableSpec]) -> Result<VariableSpec, ExtGradError> {
        match inputs {
            [input] => Ok(input.clone()),
            _ => Err(self.arity_error(inputs.len())),
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
        let [x] = inputs else {
            return Err(self.arity_error(inputs.len()));
        };
        let shifted = add_op(x, &full_like(x, self.offset)?)?;
        for slot in outputs.values_mut() {
            *slot = Some(shifted.clone());
        }
        Ok(())
    }

    fn backward(
        &self,
        _state: Self::State,
        root_gradients: &RootGradients,
        variables: &mut GradientSlots,
    ) -> Result<(), ExtGradError> {
        self.backward_calls.fetch_add(1, Ordering::Relaxed);
        let grad_output = root_gradients.get(&0).ok_or_else(|| {
            ExtGradError::BackwardError(format!("{}: missing root gradient for output 0", self.name()))
        })?;
        for slot in variables.values_mut() {
            *slot = Some(grad_output.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "shift_test.rs"]
mod tests;
