use crate::tensor::Tensor;
use std::fmt;

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.try_read() {
            Ok(guard) => f
                .debug_struct("Tensor")
                .field("shape", &guard.shape)
                .field("dtype", &guard.dtype)
                .field("device", &guard.device)
                .field("requires_grad", &guard.requires_grad)
                .field("is_leaf", &guard.grad_fn.is_none())
                .field("buffer", &guard.buffer)
                .finish(),
            Err(_) => f.write_str("Tensor { <locked> }"),
        }
    }
}
