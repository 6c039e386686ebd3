//! Datasets for extgrad: the [`Dataset`] trait and seeded synthetic
//! classification data.

pub mod dataset;
pub mod synthetic;

pub use dataset::Dataset;
pub use synthetic::{generate_random_data_sample, SyntheticClassification};
