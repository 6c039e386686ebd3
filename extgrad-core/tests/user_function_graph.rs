use extgrad_core::function::{apply_user_function, PlusShift, UserSigmoid};
use extgrad_core::nn::{
    Criterion, CrossEntropyWithSoftmax, Linear, Module, Reduction, Sigmoid, UserActivation,
};
use extgrad_core::ops::activation::sigmoid_op;
use extgrad_core::ops::reduction::sum_op;
use extgrad_core::{ExtGradError, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

mod common;
use common::{create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_tensor_equality_is_by_value() {
    let t1 = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let t2 = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let t3 = create_test_tensor(vec![1.0, 2.5], vec![2]);
    let t4 = create_test_tensor(vec![1.0, 2.0], vec![1, 2]);
    assert_eq!(t1, t2);
    assert_ne!(t1, t3);
    assert_ne!(t1, t4);
}

#[test]
fn test_user_sigmoid_inside_a_layer_stack() -> Result<(), ExtGradError> {
    let x = create_test_tensor(vec![0.5, -1.0, 2.0, 0.0, 1.5, -0.5], vec![3, 2]);
    let target = create_test_tensor(vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.0], vec![3, 2]);
    let loss_fn = CrossEntropyWithSoftmax::new(Reduction::Sum);

    let run = |activation: Box<dyn Module>| -> Result<Vec<f32>, ExtGradError> {
        let layer = Linear::new(2, 2, true, &mut StdRng::seed_from_u64(11))?;
        let hidden = activation.forward(&layer.forward(&x)?)?;
        loss_fn.calculate(&hidden, &target)?.backward()?;
        layer.weight().grad().unwrap().get_f32_data()
    };

    let f = Arc::new(UserSigmoid::new());
    let with_user = run(Box::new(UserActivation::new(Arc::clone(&f))))?;
    let with_builtin = run(Box::new(Sigmoid::new()))?;
    assert_eq!(with_user, with_builtin);
    assert_eq!((f.forward_calls(), f.backward_calls()), (1, 1));
    Ok(())
}

#[test]
fn test_shift_and_sigmoid_chain_matches_builtin() -> Result<(), ExtGradError> {
    let shift = Arc::new(PlusShift::plus_three());
    let sigmoid = Arc::new(UserSigmoid::new());

    let x_user = create_test_tensor_with_grad(vec![-4.0, -3.0, 0.0], vec![3]);
    let shifted = apply_user_function(&shift, &[x_user.clone()])?;
    let y_user = apply_user_function(&sigmoid, &[shifted])?;
    sum_op(&y_user, None, false)?.backward()?;

    let x_ref = create_test_tensor_with_grad(vec![-1.0, 0.0, 3.0], vec![3]);
    let y_ref = sigmoid_op(&x_ref)?;
    sum_op(&y_ref, None, false)?.backward()?;

    assert_eq!(y_user.get_f32_data()?, y_ref.get_f32_data()?);
    assert_eq!(
        x_user.grad().unwrap().get_f32_data()?,
        x_ref.grad().unwrap().get_f32_data()?
    );
    Ok(())
}

#[test]
fn test_graph_without_gradients_records_nothing() -> Result<(), ExtGradError> {
    let f = Arc::new(UserSigmoid::new());
    let x = Tensor::new(vec![0.0; 4], vec![2, 2])?;
    let y = apply_user_function(&f, &[x])?;
    assert!(y.grad_fn().is_none());
    assert_eq!(y.backward(), Err(ExtGradError::BackwardNonScalar));
    assert_eq!(f.backward_calls(), 0);
    Ok(())
}
