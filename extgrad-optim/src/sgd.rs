use crate::learner::Learner;
use crate::schedule::LearningRateSchedule;
use extgrad_core::{ExtGradError, Tensor};

/// Plain stochastic gradient descent: `p -= rate * grad(p)`.
///
/// `rate` is the schedule's per-sample rate, and `grad(p)` is the gradient
/// of the loss summed over the minibatch.
#[derive(Debug)]
pub struct SgdLearner {
    parameters: Vec<Tensor>,
    schedule: LearningRateSchedule,
    samples_seen: usize,
    last_minibatch_size: usize,
}

impl SgdLearner {
    pub fn new(parameters: impl IntoIterator<Item = Tensor>, schedule: LearningRateSchedule) -> Self {
        SgdLearner {
            parameters: parameters.into_iter().collect(),
            schedule,
            samples_seen: 0,
            last_minibatch_size: 1,
        }
    }

    pub fn schedule(&self) -> &LearningRateSchedule {
        &self.schedule
    }

    pub fn samples_seen(&self) -> usize {
        self.samples_seen
    }
}

impl Learner for SgdLearner {
    fn parameters(&self) -> &[Tensor] {
        &self.parameters
    }

    fn update(&mut self, sample_count: usize) -> Result<(), ExtGradError> {
        if sample_count == 0 {
            log::warn!("SGD update called with an empty minibatch; skipping.");
            return Ok(());
        }
        let rate = self.schedule.per_sample_rate(self.samples_seen, sample_count);

        for param in self.parameters.iter() {
            if !param.requires_grad() {
                continue;
            }
            let grad = match param.grad() {
                Some(g) => g,
                None => continue,
            };
            if grad.dtype() != param.dtype() {
                return Err(ExtGradError::DataTypeMismatch {
                    expected: param.dtype(),
                    actual: grad.dtype(),
                    operation: "Parameter and Gradient in SGD update".to_string(),
                });
            }
            param.sub_scaled_(&grad, rate)?;
        }

        self.samples_seen += sample_count;
        self.last_minibatch_size = sample_count;
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.schedule
            .per_sample_rate(self.samples_seen, self.last_minibatch_size)
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
