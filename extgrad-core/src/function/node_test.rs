#[cfg(test)]
mod tests {
    use crate::device::StorageDevice;
    use crate::error::ExtGradError;
    use crate::function::{
        apply_user_function, GradientSlots, OutputSlots, RootGradients, UserFunction,
        UserSigmoid, VariableSpec,
    };
    use crate::ops::arithmetic::{add_op, mul_op};
    use crate::tensor::{ones, Tensor};
    use crate::types::DType;
    use crate::utils::testing::check_tensor_near;
    use std::collections::BTreeSet;
    use std::sync::{Arc, Mutex};

    /// `y = a * b`, with switches to misbehave and a log of what it was given.
    #[derive(Debug, Default)]
    struct Product {
        skip_output: bool,
        skip_gradients: bool,
        wrong_output_shape: bool,
        f64_gradients: bool,
        seen_retain: Mutex<Vec<BTreeSet<usize>>>,
        seen_gradient_slots: Mutex<Vec<Vec<usize>>>,
    }

    impl UserFunction for Product {
        type State = (Tensor, Tensor);

        fn name(&self) -> &str {
            "Product"
        }

        fn infer_output(&self, inputs: &[VariableSpec]) -> Result<VariableSpec, ExtGradError> {
            if inputs.len() != 2 {
                return Err(ExtGradError::InvalidArity {
                    function: self.name().to_string(),
                    expected: 2,
                    actual: inputs.len(),
                });
            }
            Ok(inputs[0].clone())
        }

        fn forward(
            &self,
            inputs: &[Tensor],
            outputs: &mut OutputSlots,
            _device: StorageDevice,
            outputs_to_retain: &BTreeSet<usize>,
        ) -> Result<Self::State, ExtGradError> {
            self.seen_retain.lock().unwrap().push(outputs_to_retain.clone());
            assert!(inputs.iter().all(|t| !t.requires_grad()), "inputs arrive detached");
            if !self.skip_output {
                let y = if self.wrong_output_shape {
                    ones(&[7])?
                } else {
                    mul_op(&inputs[0], &inputs[1])?
                };
                outputs.insert(0, Some(y));
            }
            Ok((inputs[0].clone(), inputs[1].clone()))
        }

        fn backward(
            &self,
            (a, b): Self::State,
            root_gradients: &RootGradients,
            variables: &mut GradientSlots,
        ) -> Result<(), ExtGradError> {
            self.seen_gradient_slots
                .lock()
                .unwrap()
                .push(variables.keys().copied().collect());
            if self.skip_gradients {
                return Ok(());
            }
            let g = &root_gradients[&0];
            for (index, slot) in variables.iter_mut() {
                let other = if *index == 0 { &b } else { &a };
                let grad = mul_op(g, other)?;
                *slot = Some(if self.f64_gradients {
                    Tensor::new_f64(grad.to_f64_vec()?, grad.shape())?
                } else {
                    grad
                });
            }
            Ok(())
        }
    }

    fn pair(requires_a: bool, requires_b: bool) -> Result<(Tensor, Tensor), ExtGradError> {
        let a = Tensor::new(vec![1.0, 2.0], vec![2])?;
        let b = Tensor::new(vec![3.0, 4.0], vec![2])?;
        a.set_requires_grad(requires_a)?;
        b.set_requires_grad(requires_b)?;
        Ok((a, b))
    }

    #[test]
    fn test_gradients_flow_to_both_inputs() -> Result<(), ExtGradError> {
        let f = Arc::new(Product::default());
        let (a, b) = pair(true, true)?;
        let y = apply_user_function(&f, &[a.clone(), b.clone()])?;
        check_tensor_near(&y, &[2], &[3.0, 8.0], 1e-6);
        assert!(!y.is_leaf());

        y.backward_with_grad(Tensor::new(vec![1.0, 1.0], vec![2])?)?;
        check_tensor_near(&a.grad().unwrap(), &[2], &[3.0, 4.0], 1e-6);
        check_tensor_near(&b.grad().unwrap(), &[2], &[1.0, 2.0], 1e-6);
        assert_eq!(*f.seen_gradient_slots.lock().unwrap(), vec![vec![0, 1]]);
        assert_eq!(*f.seen_retain.lock().unwrap(), vec![BTreeSet::from([0])]);
        Ok(())
    }

    #[test]
    fn test_only_inputs_requiring_grad_get_slots() -> Result<(), ExtGradError> {
        let f = Arc::new(Product::default());
        let (a, b) = pair(false, true)?;
        let y = apply_user_function(&f, &[a.clone(), b.clone()])?;
        y.backward_with_grad(Tensor::new(vec![1.0, 1.0], vec![2])?)?;

        assert_eq!(*f.seen_gradient_slots.lock().unwrap(), vec![vec![1]]);
        assert!(a.grad().is_none());
        check_tensor_near(&b.grad().unwrap(), &[2], &[1.0, 2.0], 1e-6);
        Ok(())
    }

    #[test]
    fn test_no_recording_without_requires_grad() -> Result<(), ExtGradError> {
        let f = Arc::new(Product::default());
        let (a, b) = pair(false, false)?;
        let y = apply_user_function(&f, &[a, b])?;
        assert!(y.is_leaf());
        assert!(!y.requires_grad());
        assert_eq!(*f.seen_retain.lock().unwrap(), vec![BTreeSet::new()]);
        Ok(())
    }

    #[test]
    fn test_unpopulated_output_is_an_error() -> Result<(), ExtGradError> {
        let f = Arc::new(Product {
            skip_output: true,
            ..Default::default()
        });
        let (a, b) = pair(true, true)?;
        assert_eq!(
            apply_user_function(&f, &[a, b]).err(),
            Some(ExtGradError::OutputNotPopulated {
                function: "Product".to_string(),
                index: 0
            })
        );
        Ok(())
    }

    #[test]
    fn test_output_must_match_declaration() -> Result<(), ExtGradError> {
        let f = Arc::new(Product {
            wrong_output_shape: true,
            ..Default::default()
        });
        let (a, b) = pair(false, false)?;
        assert!(matches!(
            apply_user_function(&f, &[a, b]),
            Err(ExtGradError::ShapeMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_unpopulated_gradient_is_an_error() -> Result<(), ExtGradError> {
        let f = Arc::new(Product {
            skip_gradients: true,
            ..Default::default()
        });
        let (a, b) = pair(true, false)?;
        let y = apply_user_function(&f, &[a, b])?;
        assert_eq!(
            y.backward_with_grad(Tensor::new(vec![1.0, 1.0], vec![2])?),
            Err(ExtGradError::GradientNotPopulated {
                function: "Product".to_string(),
                index: 0
            })
        );
        Ok(())
    }

    #[test]
    fn test_gradient_dtype_must_match_input() -> Result<(), ExtGradError> {
        let f = Arc::new(Product {
            f64_gradients: true,
            ..Default::default()
        });
        let (a, b) = pair(true, false)?;
        let y = apply_user_function(&f, &[a.clone(), b])?;
        assert!(matches!(
            y.backward_with_grad(Tensor::new(vec![1.0, 1.0], vec![2])?),
            Err(ExtGradError::DataTypeMismatch {
                expected: DType::F32,
                actual: DType::F64,
                ..
            })
        ));
        assert!(a.grad().is_none());
        Ok(())
    }

    #[test]
    fn test_state_is_consumed_by_first_backward() -> Result<(), ExtGradError> {
        let f = Arc::new(UserSigmoid::new());
        let x = Tensor::new(vec![0.0, 1.0], vec![2])?.requires_grad_()?;
        let y = apply_user_function(&f, &[x])?;
        let g = Tensor::new(vec![1.0, 1.0], vec![2])?;

        y.backward_with_grad(g.clone())?;
        assert_eq!(
            y.backward_with_grad(g),
            Err(ExtGradError::StateConsumed {
                function: "UserSigmoid".to_string()
            })
        );
        assert_eq!(f.backward_calls(), 1);
        Ok(())
    }

    #[test]
    fn test_each_application_gets_its_own_state() -> Result<(), ExtGradError> {
        let f = Arc::new(UserSigmoid::new());
        let x = Tensor::new(vec![0.0], vec![1])?.requires_grad_()?;
        let y1 = apply_user_function(&f, &[x.clone()])?;
        let y2 = apply_user_function(&f, &[x.clone()])?;
        add_op(&y1, &y2)?.backward()?;

        assert_eq!((f.forward_calls(), f.backward_calls()), (2, 2));
        check_tensor_near(&x.grad().unwrap(), &[1], &[0.5], 1e-6);
        Ok(())
    }

    #[test]
    fn test_variable_spec_of_tensor() -> Result<(), ExtGradError> {
        let t = Tensor::new_f64(vec![0.0; 6], vec![3, 2])?;
        assert_eq!(VariableSpec::of(&t), VariableSpec::new(vec![3, 2], DType::F64));
        Ok(())
    }
}
