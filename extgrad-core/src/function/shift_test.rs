#[cfg(test)]
mod tests {
    use crate::autograd::grad_check::{check_grad, GradCheckError};
    use crate::error::ExtGradError;
    use crate::function::{apply_user_function, PlusShift, UserSigmoid};
    use crate::ops::reduction::sum_op;
    use crate::tensor::Tensor;
    use crate::utils::testing::check_tensor_near;
    use std::sync::Arc;

    #[test]
    fn test_plus_three_forward() -> Result<(), ExtGradError> {
        let f = Arc::new(PlusShift::plus_three());
        assert_eq!(f.offset(), 3.0);
        let x = Tensor::new(vec![-1.0, 0.0, 2.5], vec![3, 1])?;
        let y = apply_user_function(&f, &[x])?;
        check_tensor_near(&y, &[3, 1], &[2.0, 3.0, 5.5], 1e-6);
        assert!(y.is_leaf(), "no input requires grad, nothing is recorded");
        assert_eq!(f.forward_calls(), 1);
        Ok(())
    }

    #[test]
    fn test_plus_shift_passes_gradient_through() -> Result<(), ExtGradError> {
        let f = Arc::new(PlusShift::new(-0.5));
        let x = Tensor::new(vec![1.0, 2.0], vec![2])?.requires_grad_()?;
        let y = apply_user_function(&f, &[x.clone()])?;
        y.backward_with_grad(Tensor::new(vec![0.25, -4.0], vec![2])?)?;
        check_tensor_near(&x.grad().unwrap(), &[2], &[0.25, -4.0], 1e-6);
        assert_eq!(f.backward_calls(), 1);
        Ok(())
    }

    #[test]
    fn test_plus_shift_grad_check() -> Result<(), GradCheckError> {
        let x = Tensor::new_f64(vec![0.1, -2.0, 5.0], vec![3])?;
        x.set_requires_grad(true)?;
        let output_grad = Tensor::new_f64(vec![1.0, 2.0, 3.0], vec![3])?;
        let f = Arc::new(PlusShift::plus_three());
        check_grad(|inputs| apply_user_function(&f, inputs), &[x], &output_grad, 1e-6, 1e-6)
    }

    #[test]
    fn test_shift_then_sigmoid_composes() -> Result<(), ExtGradError> {
        let shift = Arc::new(PlusShift::plus_three());
        let sigmoid = Arc::new(UserSigmoid::new());
        let x = Tensor::new(vec![-3.0], vec![1])?.requires_grad_()?;

        let y = apply_user_function(&sigmoid, &[apply_user_function(&shift, &[x.clone()])?])?;
        check_tensor_near(&y, &[1], &[0.5], 1e-6);
        sum_op(&y, None, false)?.backward()?;

        // sigmoid'(0) * 1
        check_tensor_near(&x.grad().unwrap(), &[1], &[0.25], 1e-6);
        assert_eq!((shift.backward_calls(), sigmoid.backward_calls()), (1, 1));
        Ok(())
    }

    #[test]
    fn test_plus_shift_rejects_no_inputs() {
        let f = Arc::new(PlusShift::plus_three());
        assert!(matches!(
            apply_user_function(&f, &[]),
            Err(ExtGradError::InvalidArity { expected: 1, actual: 0, .. })
        ));
    }
}
