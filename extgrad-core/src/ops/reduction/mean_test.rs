#[cfg(test)]
mod tests {
    use crate::error::ExtGradError;
    use crate::ops::reduction::mean_op;
    use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

    #[test]
    fn test_mean_forward() -> Result<(), ExtGradError> {
        let a = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        check_tensor_near(&mean_op(&a, None, false)?, &[], &[2.5], 1e-6);
        check_tensor_near(&mean_op(&a, Some(&[0]), false)?, &[2], &[2.0, 3.0], 1e-6);
        Ok(())
    }

    #[test]
    fn test_mean_backward() -> Result<(), ExtGradError> {
        let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![4]);
        mean_op(&a, None, false)?.backward()?;
        check_tensor_near(&a.grad().unwrap(), &[4], &[0.25; 4], 1e-6);
        Ok(())
    }
}
