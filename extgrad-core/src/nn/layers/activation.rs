use crate::error::ExtGradError;
use crate::nn::module::Module;
use crate::ops::activation::sigmoid_op;
use crate::tensor::Tensor;

/// Built-in logistic sigmoid layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Self {
        Sigmoid
    }
}

impl Module for Sigmoid {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ExtGradError> {
        sigmoid_op(input)
    }

    fn modules(&self) -> Vec<&dyn Module> {
        vec![self]
    }
}
