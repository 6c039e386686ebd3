use crate::autograd::{topological_sort, BackwardOp};
use crate::error::ExtGradError;
use crate::ops::arithmetic::add_op;
use crate::tensor::{NodeId, Tensor};
use crate::tensor_data::TensorData;
use std::collections::HashMap;
use std::sync::Arc;

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag for this tensor.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), ExtGradError> {
        let mut guard = self.write_data();
        if requires_grad && guard.grad_fn.is_some() {
            log::warn!(
                "requires_grad set on a non-leaf tensor; gradients will not accumulate on it"
            );
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Builder-style `set_requires_grad(true)`.
    pub fn requires_grad_(self) -> Result<Self, ExtGradError> {
        self.set_requires_grad(true)?;
        Ok(self)
    }

    /// Returns a handle to the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Returns the backward node that produced this tensor.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    pub fn set_grad_fn(&self, grad_fn: Option<Arc<dyn BackwardOp>>) -> Result<(), ExtGradError> {
        self.write_data().grad_fn = grad_fn;
        Ok(())
    }

    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf()
    }

    /// Returns a new leaf sharing this tensor's storage, cut off from the graph.
    ///
    /// The result has `requires_grad = false` and no `grad_fn`. Writers go
    /// through copy-on-write, so updating one side never changes the other.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        Tensor::from_tensor_data(TensorData {
            buffer: guard.buffer.clone(),
            device: guard.device,
            dtype: guard.dtype,
            shape: guard.shape.clone(),
            strides: guard.strides.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Returns a detached leaf that owns a private copy of the data.
    pub fn deep_clone(&self) -> Result<Tensor, ExtGradError> {
        let shape = self.shape();
        match self.dtype() {
            crate::types::DType::F32 => Tensor::new(self.get_f32_data()?, shape),
            crate::types::DType::F64 => Tensor::new_f64(self.get_f64_data()?, shape),
        }
    }

    /// Adds `grad_to_add` into this tensor's `grad` field.
    pub fn acc_grad(&self, grad_to_add: Tensor) -> Result<(), ExtGradError> {
        let existing = self.grad();
        if grad_to_add.shape() != self.shape() {
            return Err(ExtGradError::ShapeMismatch {
                expected: format!("{:?}", self.shape()),
                actual: format!("{:?}", grad_to_add.shape()),
                operation: "acc_grad".to_string(),
            });
        }
        let new_grad = match existing {
            Some(existing_grad) => add_op(&existing_grad, &grad_to_add)?,
            None => grad_to_add.detach(),
        };
        self.write_data().grad = Some(new_grad);
        Ok(())
    }

    /// Backpropagates from a one-element tensor, seeding it with `1`.
    ///
    /// # Errors
    /// * `BackwardNonScalar` if the tensor has more than one element.
    /// * `RequiresGradNotMet` if the tensor is not part of a recorded graph.
    pub fn backward(&self) -> Result<(), ExtGradError> {
        if self.numel() != 1 {
            return Err(ExtGradError::BackwardNonScalar);
        }
        let seed = crate::tensor::ones_like(self)?;
        self.backward_with_grad(seed)
    }

    /// Backpropagates from this tensor using `gradient` as `dL/dself`.
    ///
    /// Gradients are summed per node in reverse topological order and added to
    /// the `grad` of every leaf that requires it. Intermediate tensors never
    /// store a gradient.
    pub fn backward_with_grad(&self, gradient: Tensor) -> Result<(), ExtGradError> {
        if !self.requires_grad() {
            return Err(ExtGradError::RequiresGradNotMet);
        }
        if gradient.shape() != self.shape() {
            return Err(ExtGradError::ShapeMismatch {
                expected: format!("{:?}", self.shape()),
                actual: format!("{:?}", gradient.shape()),
                operation: "backward".to_string(),
            });
        }
        if gradient.dtype() != self.dtype() {
            return Err(ExtGradError::DataTypeMismatch {
                expected: self.dtype(),
                actual: gradient.dtype(),
                operation: "backward".to_string(),
            });
        }

        let sorted_nodes = topological_sort(self)?;
        let mut grad_map: HashMap<NodeId, Tensor> = HashMap::new();
        grad_map.insert(self.node_id(), gradient.detach());

        for node in sorted_nodes {
            let Some(accumulated_grad) = grad_map.remove(&node.node_id()) else {
                continue;
            };

            let Some(grad_fn) = node.grad_fn() else {
                if node.requires_grad() {
                    node.acc_grad(accumulated_grad)?;
                }
                continue;
            };

            let input_grads = grad_fn.backward(&accumulated_grad)?;
            let inputs = grad_fn.inputs();
            if input_grads.len() != inputs.len() {
                return Err(ExtGradError::BackwardError(format!(
                    "{:?} returned {} gradients for {} inputs",
                    grad_fn,
                    input_grads.len(),
                    inputs.len()
                )));
            }

            for (input, input_grad) in inputs.iter().zip(input_grads) {
                if !input.requires_grad() {
                    continue;
                }
                if input_grad.shape() != input.shape() {
                    return Err(ExtGradError::ShapeMismatch {
                        expected: format!("{:?}", input.shape()),
                        actual: format!("{:?}", input_grad.shape()),
                        operation: format!("backward of {:?}", grad_fn),
                    });
                }
                let input_grad = input_grad.detach();
                let merged = match grad_map.remove(&input.node_id()) {
                    Some(existing) => add_op(&existing, &input_grad)?,
                    None => input_grad,
                };
                grad_map.insert(input.node_id(), merged);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
