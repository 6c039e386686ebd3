#[cfg(test)]
mod tests {
    use crate::autograd::grad_check::{check_grad, GradCheckError};
    use crate::error::ExtGradError;
    use crate::ops::activation::sigmoid_op;
    use crate::tensor::Tensor;
    use crate::utils::testing::{check_tensor_near, create_test_tensor};

    #[test]
    fn test_sigmoid_forward() -> Result<(), ExtGradError> {
        let a = create_test_tensor(vec![0.0, 100.0, -100.0], vec![3]);
        check_tensor_near(&sigmoid_op(&a)?, &[3], &[0.5, 1.0, 0.0], 1e-6);
        Ok(())
    }

    #[test]
    fn test_sigmoid_grad_check() -> Result<(), GradCheckError> {
        let a = Tensor::new_f64(vec![-2.0, -0.5, 0.0, 0.5, 3.0, 1.0], vec![2, 3])?;
        a.set_requires_grad(true)?;
        let output_grad = Tensor::new_f64(vec![1.0, -1.0, 2.0, 0.5, 1.0, -0.25], vec![2, 3])?;
        check_grad(|x| sigmoid_op(&x[0]), &[a], &output_grad, 1e-6, 1e-6)
    }
}
