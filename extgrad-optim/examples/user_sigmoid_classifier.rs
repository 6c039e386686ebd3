use extgrad_core::function::UserSigmoid;
use extgrad_core::nn::{Module, Sigmoid, UserActivation};
use extgrad_core::ExtGradError;
use extgrad_optim::{train_classifier, TrainingConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn main() -> Result<(), ExtGradError> {
    let config = TrainingConfig::default();
    let sigmoid = Arc::new(UserSigmoid::new());

    let user = train_classifier(
        &config,
        || Box::new(UserActivation::new(Arc::clone(&sigmoid))) as Box<dyn Module>,
        &mut StdRng::seed_from_u64(0),
    )?;
    let builtin = train_classifier(&config, || Box::new(Sigmoid::new()), &mut StdRng::seed_from_u64(0))?;

    println!("{:>10} {:>12} {:>12} {:>8} {:>8}", "minibatch", "loss (udf)", "loss (std)", "err", "err");
    for (k, ((lu, lb), (eu, eb))) in user
        .losses
        .iter()
        .zip(&builtin.losses)
        .zip(user.errors.iter().zip(&builtin.errors))
        .enumerate()
    {
        println!(
            "{:>10} {:>12.6} {:>12.6} {:>8.3} {:>8.3}",
            k * config.progress_frequency,
            lu,
            lb,
            eu,
            eb
        );
    }
    println!(
        "held-out error: {:.4} (udf) / {:.4} (std); UserSigmoid ran {} forward, {} backward",
        user.held_out_error,
        builtin.held_out_error,
        sigmoid.forward_calls(),
        sigmoid.backward_calls()
    );
    Ok(())
}
