use crate::dataset::Dataset;
use extgrad_core::{ExtGradError, Tensor};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Draws a batch of separable classification data.
///
/// Every class index `y` is drawn first, uniformly from `[0, num_classes)`.
/// Then each feature is `(n + 3) * (y + 1)` with `n ~ N(0, 1)`, so clusters
/// move away from the origin as the class index grows.
///
/// Returns `(features, labels)`: `f32` tensors of shape
/// `[sample_size, feature_dim]` and one-hot `[sample_size, num_classes]`.
/// Output depends only on the state of `rng`.
///
/// # Errors
/// Returns `InvalidArgument` if `feature_dim` or `num_classes` is zero.
pub fn generate_random_data_sample<R: Rng + ?Sized>(
    sample_size: usize,
    feature_dim: usize,
    num_classes: usize,
    rng: &mut R,
) -> Result<(Tensor, Tensor), ExtGradError> {
    if feature_dim == 0 || num_classes == 0 {
        return Err(ExtGradError::InvalidArgument(format!(
            "feature_dim ({}) and num_classes ({}) must be non-zero",
            feature_dim, num_classes
        )));
    }

    let classes: Vec<usize> = (0..sample_size)
        .map(|_| rng.gen_range(0..num_classes))
        .collect();

    let mut features = Vec::with_capacity(sample_size * feature_dim);
    for &class in &classes {
        for _ in 0..feature_dim {
            let noise: f64 = StandardNormal.sample(rng);
            features.push(((noise + 3.0) * (class + 1) as f64) as f32);
        }
    }

    let mut labels = vec![0.0f32; sample_size * num_classes];
    for (i, &class) in classes.iter().enumerate() {
        labels[i * num_classes + class] = 1.0;
    }

    log::trace!(
        "generated {} samples ({} features, {} classes)",
        sample_size,
        feature_dim,
        num_classes
    );
    Ok((
        Tensor::new(features, vec![sample_size, feature_dim])?,
        Tensor::new(labels, vec![sample_size, num_classes])?,
    ))
}

/// A fixed set of samples from [`generate_random_data_sample`].
#[derive(Debug, Clone)]
pub struct SyntheticClassification {
    features: Tensor,
    labels: Tensor,
    feature_dim: usize,
    num_classes: usize,
}

impl SyntheticClassification {
    pub fn generate<R: Rng + ?Sized>(
        sample_size: usize,
        feature_dim: usize,
        num_classes: usize,
        rng: &mut R,
    ) -> Result<Self, ExtGradError> {
        let (features, labels) =
            generate_random_data_sample(sample_size, feature_dim, num_classes, rng)?;
        Ok(SyntheticClassification {
            features,
            labels,
            feature_dim,
            num_classes,
        })
    }

    /// All features, `[len, feature_dim]`.
    pub fn features(&self) -> &Tensor {
        &self.features
    }

    /// All one-hot labels, `[len, num_classes]`.
    pub fn labels(&self) -> &Tensor {
        &self.labels
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }
}

impl Dataset for SyntheticClassification {
    /// `(features [feature_dim], one-hot label [num_classes])`.
    type Item = (Tensor, Tensor);

    fn get(&self, index: usize) -> Result<Self::Item, ExtGradError> {
        if index >= self.len() {
            return Err(ExtGradError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.len()],
            });
        }
        let row = |t: &Tensor, width: usize| -> Result<Tensor, ExtGradError> {
            let guard = t.read_data();
            let data = guard.buffer().try_get_cpu_f32()?;
            Tensor::new(data[index * width..(index + 1) * width].to_vec(), vec![width])
        };
        Ok((
            row(&self.features, self.feature_dim)?,
            row(&self.labels, self.num_classes)?,
        ))
    }

    fn len(&self) -> usize {
        self.features.shape()[0]
    }
}

#[cfg(test)]
#[path = "synthetic_test.rs"]
mod tests;
