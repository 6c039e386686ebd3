use extgrad_core::{ExtGradError, Tensor};

/// A parameter-update rule.
///
/// Learners hold handles to the parameters they update. Since a [`Tensor`] is
/// a shared handle, updates are visible through the model that owns the
/// parameters.
pub trait Learner: std::fmt::Debug + Send {
    /// The parameters this learner updates.
    fn parameters(&self) -> &[Tensor];

    /// Applies one update from the accumulated gradients.
    ///
    /// `sample_count` is the number of samples that contributed to the
    /// gradients, i.e. the minibatch size. Gradients are those of the loss
    /// summed over the minibatch.
    fn update(&mut self, sample_count: usize) -> Result<(), ExtGradError>;

    /// The per-sample rate that the next update will use.
    fn learning_rate(&self) -> f64;

    /// Clears the gradients of every parameter.
    fn zero_grad(&mut self) {
        for param in self.parameters() {
            param.clear_grad();
        }
    }
}
