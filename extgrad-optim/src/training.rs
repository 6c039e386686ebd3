use crate::schedule::{LearningRateSchedule, UnitType};
use crate::sgd::SgdLearner;
use crate::trainer::Trainer;
use extgrad_core::nn::{
    fully_connected_classifier, ClassificationError, CrossEntropyWithSoftmax, Module, Reduction,
};
use extgrad_core::{ExtGradError, Tensor};
use extgrad_data::generate_random_data_sample;
use rand::Rng;

/// Settings for [`train_classifier`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub input_dim: usize,
    pub num_classes: usize,
    pub hidden_dim: usize,
    pub num_hidden_layers: usize,
    /// Size of the first generated batch, kept as a held-out set.
    pub initial_sample_size: usize,
    /// Per-minibatch learning rate.
    pub learning_rate: f64,
    pub minibatch_size: usize,
    /// Total training samples; `num_samples / minibatch_size` minibatches.
    pub num_samples: usize,
    /// Record metrics every this many minibatches.
    pub progress_frequency: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            input_dim: 2,
            num_classes: 2,
            hidden_dim: 50,
            num_hidden_layers: 2,
            initial_sample_size: 64,
            learning_rate: 0.5,
            minibatch_size: 25,
            num_samples: 20000,
            progress_frequency: 20,
        }
    }
}

impl TrainingConfig {
    pub fn num_minibatches(&self) -> usize {
        if self.minibatch_size == 0 {
            0
        } else {
            self.num_samples / self.minibatch_size
        }
    }

    fn validate(&self) -> Result<(), ExtGradError> {
        if self.minibatch_size == 0 || self.progress_frequency == 0 {
            return Err(ExtGradError::InvalidArgument(format!(
                "minibatch_size ({}) and progress_frequency ({}) must be non-zero",
                self.minibatch_size, self.progress_frequency
            )));
        }
        if self.initial_sample_size == 0 {
            return Err(ExtGradError::InvalidArgument(
                "initial_sample_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Metrics recorded by [`train_classifier`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrainingReport {
    /// Average loss of the minibatch trained at each sampling point.
    pub losses: Vec<f64>,
    /// Average classification error at each sampling point.
    pub errors: Vec<f64>,
    /// Classification error on the initial batch after training.
    pub held_out_error: f64,
}

/// Trains a fully connected classifier on synthetic separable data.
///
/// The first `initial_sample_size` samples drawn from `rng` are held out;
/// the network is then initialized from `rng` and trained with SGD on
/// `num_minibatches()` fresh minibatches, each drawn from `rng` in turn. After
/// every `progress_frequency`-th minibatch the trainer's previous-minibatch
/// loss and error averages are recorded. Every draw comes from `rng`, so two
/// calls with identically seeded generators see identical data and initial
/// weights.
///
/// `nonlinearity` builds the activation placed after each hidden layer.
pub fn train_classifier<R, N>(
    config: &TrainingConfig,
    nonlinearity: N,
    rng: &mut R,
) -> Result<TrainingReport, ExtGradError>
where
    R: Rng + ?Sized,
    N: FnMut() -> Box<dyn Module>,
{
    config.validate()?;
    let (held_out_features, held_out_labels) = generate_random_data_sample(
        config.initial_sample_size,
        config.input_dim,
        config.num_classes,
        rng,
    )?;

    let model = fully_connected_classifier(
        config.input_dim,
        config.num_classes,
        config.hidden_dim,
        config.num_hidden_layers,
        nonlinearity,
        rng,
    )?;
    let parameters: Vec<Tensor> = model
        .parameters()
        .iter()
        .map(|p| p.tensor().clone())
        .collect();
    let schedule = LearningRateSchedule::constant(config.learning_rate, UnitType::Minibatch)?;
    let mut trainer = Trainer::new(
        model,
        Box::new(CrossEntropyWithSoftmax::new(Reduction::None)),
        Box::new(ClassificationError::new(Reduction::None)),
        Box::new(SgdLearner::new(parameters, schedule)),
    );

    let num_minibatches = config.num_minibatches();
    let mut report = TrainingReport::default();
    for i in 0..num_minibatches {
        let (features, labels) = generate_random_data_sample(
            config.minibatch_size,
            config.input_dim,
            config.num_classes,
            rng,
        )?;
        trainer.train_minibatch(&features, &labels)?;

        if i % config.progress_frequency == 0 {
            let loss = trainer.previous_minibatch_loss_average();
            let error = trainer.previous_minibatch_evaluation_average();
            log::info!(
                "Minibatch: {}, Train Loss: {:.6}, Train Evaluation Criterion: {:.4}",
                i,
                loss,
                error
            );
            report.losses.push(loss);
            report.errors.push(error);
        }
    }

    report.held_out_error = trainer.test_minibatch(&held_out_features, &held_out_labels)?;
    log::info!(
        "Trained on {} samples; held-out error {:.4}",
        trainer.total_number_of_samples_seen(),
        report.held_out_error
    );
    Ok(report)
}

#[cfg(test)]
#[path = "training_test.rs"]
mod tests;
