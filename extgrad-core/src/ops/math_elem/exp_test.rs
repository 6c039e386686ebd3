#[cfg(test)]
mod tests {
    use crate::autograd::grad_check::{check_grad, GradCheckError};
    use crate::error::ExtGradError;
    use crate::ops::math_elem::exp_op;
    use crate::tensor::Tensor;
    use crate::utils::testing::{check_tensor_near, create_test_tensor};

    #[test]
    fn test_exp_forward() -> Result<(), ExtGradError> {
        let a = create_test_tensor(vec![0.0, 1.0, -1.0], vec![3]);
        check_tensor_near(
            &exp_op(&a)?,
            &[3],
            &[1.0, std::f32::consts::E, 1.0 / std::f32::consts::E],
            1e-6,
        );
        Ok(())
    }

    #[test]
    fn test_exp_grad_check() -> Result<(), GradCheckError> {
        let a = Tensor::new_f64(vec![-1.0, 0.0, 0.5, 2.0], vec![2, 2])?;
        a.set_requires_grad(true)?;
        let output_grad = Tensor::new_f64(vec![1.0, 1.0, -1.0, 0.5], vec![2, 2])?;
        check_grad(|x| exp_op(&x[0]), &[a], &output_grad, 1e-6, 1e-6)
    }
}
