use crate::learner::Learner;
use extgrad_core::nn::{Criterion, Module};
use extgrad_core::{ExtGradError, Tensor};

/// Coordinates the forward pass, loss, backward pass and parameter update
/// for one minibatch at a time.
///
/// Both criteria must return one value per sample (`Reduction::None`); the
/// trainer sums them itself, so the learner sees gradients of the summed
/// loss and can scale them by the minibatch size.
#[derive(Debug)]
pub struct Trainer<M: Module> {
    model: M,
    loss: Box<dyn Criterion>,
    evaluation: Box<dyn Criterion>,
    learner: Box<dyn Learner>,
    previous_minibatch_sample_count: usize,
    previous_minibatch_loss_sum: f64,
    previous_minibatch_evaluation_sum: f64,
    total_number_of_samples_seen: usize,
}

impl<M: Module> Trainer<M> {
    pub fn new(
        model: M,
        loss: Box<dyn Criterion>,
        evaluation: Box<dyn Criterion>,
        learner: Box<dyn Learner>,
    ) -> Self {
        Trainer {
            model,
            loss,
            evaluation,
            learner,
            previous_minibatch_sample_count: 0,
            previous_minibatch_loss_sum: 0.0,
            previous_minibatch_evaluation_sum: 0.0,
            total_number_of_samples_seen: 0,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn learner(&self) -> &dyn Learner {
        self.learner.as_ref()
    }

    /// Runs one optimization step on `features` / `labels`, both with the
    /// batch on their leading axis.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty minibatch. Errors from the
    /// model, the criteria or the backward pass are returned unchanged.
    pub fn train_minibatch(&mut self, features: &Tensor, labels: &Tensor) -> Result<(), ExtGradError> {
        let sample_count = batch_size(features)?;

        self.learner.zero_grad();
        let output = self.model.forward(features)?;
        let loss = self.loss.calculate(&output, labels)?.sum(None, false)?;
        let evaluation = self
            .evaluation
            .calculate(&output.detach(), labels)?
            .sum(None, false)?;

        loss.backward()?;
        self.learner.update(sample_count)?;

        self.previous_minibatch_sample_count = sample_count;
        self.previous_minibatch_loss_sum = loss.item_f64()?;
        self.previous_minibatch_evaluation_sum = evaluation.item_f64()?;
        self.total_number_of_samples_seen += sample_count;
        log::trace!(
            "minibatch of {}: loss sum {:.6}, evaluation sum {}",
            sample_count,
            self.previous_minibatch_loss_sum,
            self.previous_minibatch_evaluation_sum
        );
        Ok(())
    }

    /// Average evaluation criterion over `features` / `labels`, without
    /// updating any parameter or the minibatch statistics.
    pub fn test_minibatch(&self, features: &Tensor, labels: &Tensor) -> Result<f64, ExtGradError> {
        let sample_count = batch_size(features)?;
        let output = self.model.forward(features)?.detach();
        let evaluation = self.evaluation.calculate(&output, labels)?.sum(None, false)?;
        Ok(evaluation.item_f64()? / sample_count as f64)
    }

    /// Mean per-sample loss of the last trained minibatch, 0 before any.
    pub fn previous_minibatch_loss_average(&self) -> f64 {
        average(self.previous_minibatch_loss_sum, self.previous_minibatch_sample_count)
    }

    /// Mean per-sample evaluation of the last trained minibatch, 0 before any.
    pub fn previous_minibatch_evaluation_average(&self) -> f64 {
        average(
            self.previous_minibatch_evaluation_sum,
            self.previous_minibatch_sample_count,
        )
    }

    pub fn previous_minibatch_sample_count(&self) -> usize {
        self.previous_minibatch_sample_count
    }

    pub fn total_number_of_samples_seen(&self) -> usize {
        self.total_number_of_samples_seen
    }
}

fn batch_size(features: &Tensor) -> Result<usize, ExtGradError> {
    match features.shape().first() {
        Some(&n) if n > 0 => Ok(n),
        _ => Err(ExtGradError::InvalidArgument(format!(
            "a minibatch needs at least one sample, got shape {:?}",
            features.shape()
        ))),
    }
}

fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
