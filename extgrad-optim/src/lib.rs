//! Parameter updates and the training loop for extgrad models.
//!
//! A [`Learner`] owns handles to a model's parameters and applies gradient
//! updates. A [`Trainer`] drives forward, loss, backward and update for one
//! minibatch at a time, and [`train_classifier`] runs a whole training job
//! on synthetic data.

pub mod learner;
pub mod schedule;
pub mod sgd;
pub mod trainer;
pub mod training;

pub use learner::Learner;
pub use schedule::{LearningRateSchedule, UnitType};
pub use sgd::SgdLearner;
pub use trainer::Trainer;
pub use training::{train_classifier, TrainingConfig, TrainingReport};
