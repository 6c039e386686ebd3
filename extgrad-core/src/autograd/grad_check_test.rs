#[cfg(test)]
mod tests {
    use crate::autograd::grad_check::{check_grad, GradCheckError};
    use crate::error::ExtGradError;
    use crate::ops::arithmetic::mul_op;
    use crate::tensor::Tensor;

    #[test]
    fn test_grad_check_passes_for_product() -> Result<(), GradCheckError> {
        let a = Tensor::new_f64(vec![1.0, -2.0, 0.5], vec![3])?;
        let b = Tensor::new_f64(vec![3.0, 4.0, -1.5], vec![3])?;
        a.set_requires_grad(true)?;
        b.set_requires_grad(true)?;
        let output_grad = Tensor::new_f64(vec![1.0, 0.5, 2.0], vec![3])?;

        check_grad(|x| mul_op(&x[0], &x[1]), &[a.clone(), b], &output_grad, 1e-6, 1e-6)?;
        // The caller's tensors are left untouched.
        assert!(a.grad().is_none());
        Ok(())
    }

    #[test]
    fn test_grad_check_rejects_non_leaf_input() -> Result<(), ExtGradError> {
        let a = Tensor::new_f64(vec![1.0], vec![1])?;
        a.set_requires_grad(true)?;
        let b = mul_op(&a, &a)?;
        let output_grad = Tensor::new_f64(vec![1.0], vec![1])?;

        let result = check_grad(|x| Ok(x[0].clone()), &[b], &output_grad, 1e-6, 1e-6);
        assert_eq!(result, Err(GradCheckError::InputNotLeaf { input_index: 0 }));
        Ok(())
    }

    #[test]
    fn test_grad_check_reports_output_grad_shape() -> Result<(), ExtGradError> {
        let a = Tensor::new_f64(vec![1.0, 2.0], vec![2])?;
        a.set_requires_grad(true)?;
        let output_grad = Tensor::new_f64(vec![1.0], vec![1])?;

        let result = check_grad(|x| mul_op(&x[0], &x[0]), &[a], &output_grad, 1e-6, 1e-6);
        assert!(matches!(
            result,
            Err(GradCheckError::OutputGradShapeMismatch { .. })
        ));
        Ok(())
    }
}
