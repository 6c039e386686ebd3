#[cfg(test)]
mod tests {
    use crate::error::ExtGradError;
    use crate::ops::arithmetic::neg_op;
    use crate::ops::reduction::sum_op;
    use crate::utils::testing::{check_tensor_near, create_test_tensor_with_grad};

    #[test]
    fn test_neg_forward_backward() -> Result<(), ExtGradError> {
        let a = create_test_tensor_with_grad(vec![1.0, -2.0, 0.0], vec![3]);
        let b = neg_op(&a)?;
        check_tensor_near(&b, &[3], &[-1.0, 2.0, 0.0], 1e-6);

        sum_op(&b, None, false)?.backward()?;
        check_tensor_near(&a.grad().unwrap(), &[3], &[-1.0, -1.0, -1.0], 1e-6);
        Ok(())
    }
}
