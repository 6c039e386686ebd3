use crate::error::ExtGradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for all neural network modules (layers, containers, etc.).
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, ExtGradError>;

    /// Returns all learnable parameters of the module, including those of
    /// sub-modules.
    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    /// Returns all learnable parameters with hierarchical names such as
    /// `"dense0.weight"`.
    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        Vec::new()
    }

    /// Returns the direct child modules.
    fn children(&self) -> Vec<&dyn Module> {
        Vec::new()
    }

    /// Returns the direct child modules with their names.
    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        Vec::new()
    }

    /// Returns this module followed by all descendants, depth-first.
    fn modules(&self) -> Vec<&dyn Module>;
}

#[cfg(test)]
#[path = "module_test.rs"]
mod tests;
