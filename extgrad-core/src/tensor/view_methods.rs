use crate::error::ExtGradError;
use crate::ops::linalg::transpose_op;
use crate::ops::view::reshape_op;
use crate::tensor::Tensor;

impl Tensor {
    pub fn reshape(&self, new_shape: Vec<usize>) -> Result<Tensor, ExtGradError> {
        reshape_op(self, new_shape)
    }

    /// Swaps the two axes of a 2-D tensor.
    pub fn t(&self) -> Result<Tensor, ExtGradError> {
        transpose_op(self)
    }
}
