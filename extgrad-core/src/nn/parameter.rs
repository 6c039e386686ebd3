use crate::error::ExtGradError;
use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A learnable tensor owned by a [`Module`](crate::nn::Module).
///
/// The wrapped tensor is always a leaf with `requires_grad = true`. Cloning a
/// `Parameter` clones the handle, so an optimizer holding a clone updates the
/// same storage the module reads.
#[derive(Clone)]
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Wraps `tensor` and marks it as requiring gradients.
    ///
    /// # Errors
    /// Returns `RequiresGradOnNonLeaf` if `tensor` was produced by an operation.
    pub fn try_new(tensor: Tensor, name: Option<String>) -> Result<Self, ExtGradError> {
        if !tensor.is_leaf() {
            return Err(ExtGradError::RequiresGradOnNonLeaf);
        }
        tensor.set_requires_grad(true)?;
        Ok(Parameter { tensor, name })
    }

    /// Like [`try_new`](Self::try_new) for a tensor known to be a leaf. A
    /// non-leaf input is detached first.
    pub fn new(tensor: Tensor, name: Option<String>) -> Self {
        let tensor = if tensor.is_leaf() { tensor } else { tensor.detach() };
        tensor.write_data().requires_grad = true;
        Parameter { tensor, name }
    }

    pub fn new_unnamed(tensor: Tensor) -> Self {
        Self::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    pub fn into_inner(self) -> Tensor {
        self.tensor
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("shape", &self.tensor.shape())
            .field("dtype", &self.tensor.dtype())
            .finish()
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
