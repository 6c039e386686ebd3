#[cfg(test)]
mod tests {
    use crate::autograd::grad_check::{check_grad, GradCheckError};
    use crate::device::StorageDevice;
    use crate::error::ExtGradError;
    use crate::function::{
        apply_user_function, GradientSlots, OutputSlots, RootGradients, UserFunction,
        UserSigmoid, VariableSpec,
    };
    use crate::ops::activation::sigmoid_op;
    use crate::ops::arithmetic::{add_op, div_op, neg_op};
    use crate::ops::math_elem::exp_op;
    use crate::tensor::{ones_like, Tensor};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    #[test]
    fn test_forward_matches_builtin_bitwise() -> Result<(), ExtGradError> {
        let data = vec![-4.0, -1.25, -0.1, 0.0, 0.3, 2.5, 7.0, 20.0];
        let x = Tensor::new(data, vec![2, 4])?;
        let f = Arc::new(UserSigmoid::new());

        let user = apply_user_function(&f, &[x.clone()])?;
        let builtin = sigmoid_op(&x)?;
        assert_eq!(user.get_f32_data()?, builtin.get_f32_data()?);
        assert_eq!(f.forward_calls(), 1);
        assert_eq!(f.backward_calls(), 0);
        Ok(())
    }

    #[test]
    fn test_backward_matches_builtin_bitwise() -> Result<(), ExtGradError> {
        let data = vec![-3.0, -0.5, 0.0, 0.75, 1.5, 4.0];
        let upstream = Tensor::new(vec![1.0, -2.0, 0.5, 3.0, -0.25, 1.0], vec![3, 2])?;

        let x_user = Tensor::new(data.clone(), vec![3, 2])?.requires_grad_()?;
        let f = Arc::new(UserSigmoid::new());
        apply_user_function(&f, &[x_user.clone()])?.backward_with_grad(upstream.clone())?;

        let x_builtin = Tensor::new(data, vec![3, 2])?.requires_grad_()?;
        sigmoid_op(&x_builtin)?.backward_with_grad(upstream)?;

        assert_eq!(
            x_user.grad().unwrap().get_f32_data()?,
            x_builtin.grad().unwrap().get_f32_data()?
        );
        assert_eq!(f.forward_calls(), 1);
        assert_eq!(f.backward_calls(), 1);
        Ok(())
    }

    #[test]
    fn test_user_sigmoid_grad_check() -> Result<(), GradCheckError> {
        let x = Tensor::new_f64(vec![-2.0, -0.3, 0.0, 0.4, 1.7, 3.0], vec![2, 3])?;
        x.set_requires_grad(true)?;
        let output_grad = Tensor::new_f64(vec![1.0, 0.5, -1.0, 2.0, -0.5, 1.0], vec![2, 3])?;
        let f = Arc::new(UserSigmoid::new());
        check_grad(
            |inputs| apply_user_function(&f, inputs),
            &[x],
            &output_grad,
            1e-6,
            1e-6,
        )
    }

    #[test]
    fn test_user_sigmoid_rejects_two_inputs() -> Result<(), ExtGradError> {
        let a = Tensor::new(vec![1.0], vec![1, 1])?;
        let f = Arc::new(UserSigmoid::new());
        assert_eq!(
            apply_user_function(&f, &[a.clone(), a]).err(),
            Some(ExtGradError::InvalidArity {
                function: "UserSigmoid".to_string(),
                expected: 1,
                actual: 2,
            })
        );
        assert_eq!(f.forward_calls(), 0);
        Ok(())
    }

    /// Sigmoid whose backward treats the derivative as constant 1.
    #[derive(Debug)]
    struct ConstantDerivativeSigmoid;

    impl UserFunction for ConstantDerivativeSigmoid {
        type State = ();

        fn name(&self) -> &str {
            "ConstantDerivativeSigmoid"
        }

        fn infer_output(&self, inputs: &[VariableSpec]) -> Result<VariableSpec, ExtGradError> {
            Ok(inputs[0].clone())
        }

        fn forward(
            &self,
            inputs: &[Tensor],
            outputs: &mut OutputSlots,
            _device: StorageDevice,
            _outputs_to_retain: &BTreeSet<usize>,
        ) -> Result<(), ExtGradError> {
            let x = &inputs[0];
            let one = ones_like(x)?;
            let s = div_op(&one, &add_op(&one, &exp_op(&neg_op(x)?)?)?)?;
            outputs.insert(0, Some(s));
            Ok(())
        }

        fn backward(
            &self,
            _state: (),
            root_gradients: &RootGradients,
            variables: &mut GradientSlots,
        ) -> Result<(), ExtGradError> {
            variables.insert(0, Some(root_gradients[&0].clone()));
            Ok(())
        }
    }

    #[test]
    fn test_constant_derivative_sigmoid_fails_grad_check() -> Result<(), ExtGradError> {
        let x = Tensor::new_f64(vec![-1.0, 0.0, 2.0], vec![3])?;
        x.set_requires_grad(true)?;
        let output_grad = Tensor::new_f64(vec![1.0, 1.0, 1.0], vec![3])?;
        let f = Arc::new(ConstantDerivativeSigmoid);

        let result = check_grad(
            |inputs| apply_user_function(&f, inputs),
            &[x],
            &output_grad,
            1e-6,
            1e-4,
        );
        assert!(matches!(result, Err(GradCheckError::GradientMismatch { .. })));
        Ok(())
    }
}
