use crate::error::ExtGradError;
use crate::function::{apply_user_function, UserFunction};
use crate::nn::module::Module;
use crate::tensor::Tensor;
use std::fmt;
use std::sync::Arc;

/// Adapts a single-input [`UserFunction`] into a [`Module`], so a custom node
/// can stand wherever a built-in activation layer can.
///
/// The function instance is shared: counters and any other instance state
/// are observed through every clone of the `Arc`.
pub struct UserActivation<F: UserFunction> {
    function: Arc<F>,
}

impl<F: UserFunction> UserActivation<F> {
    pub fn new(function: Arc<F>) -> Self {
        UserActivation { function }
    }

    pub fn function(&self) -> &Arc<F> {
        &self.function
    }
}

impl<F: UserFunction> fmt::Debug for UserActivation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserActivation")
            .field("function", &self.function.name())
            .finish()
    }
}

impl<F: UserFunction> Module for UserActivation<F> {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ExtGradError> {
        apply_user_function(&self.function, &[input.clone()])
    }

    fn modules(&self) -> Vec<&dyn Module> {
        vec![self]
    }
}
