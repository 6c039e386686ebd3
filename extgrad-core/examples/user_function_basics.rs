use extgrad_core::function::{apply_user_function, PlusShift, UserSigmoid};
use extgrad_core::ops::reduction::sum_op;
use extgrad_core::{ExtGradError, Tensor};
use std::sync::Arc;

fn main() -> Result<(), ExtGradError> {
    let shift = Arc::new(PlusShift::plus_three());
    let sigmoid = Arc::new(UserSigmoid::new());

    let x = Tensor::new(vec![-5.0, -3.0, -1.0, 1.0], vec![2, 2])?.requires_grad_()?;
    let y = apply_user_function(&sigmoid, &[apply_user_function(&shift, &[x.clone()])?])?;
    println!("sigmoid(x + 3) = {:?}", y.get_f32_data()?);

    sum_op(&y, None, false)?.backward()?;
    if let Some(grad) = x.grad() {
        println!("d/dx sum(sigmoid(x + 3)) = {:?}", grad.get_f32_data()?);
    }

    println!(
        "PlusShift: {} forward / {} backward, UserSigmoid: {} forward / {} backward",
        shift.forward_calls(),
        shift.backward_calls(),
        sigmoid.forward_calls(),
        sigmoid.backward_calls()
    );
    Ok(())
}
