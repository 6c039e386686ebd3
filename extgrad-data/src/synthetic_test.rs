#[cfg(test)]
mod tests {
    use crate::dataset::Dataset;
    use crate::synthetic::{generate_random_data_sample, SyntheticClassification};
    use approx::assert_relative_eq;
    use extgrad_core::{DType, ExtGradError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shapes_and_one_hot_labels() -> Result<(), ExtGradError> {
        let mut rng = StdRng::seed_from_u64(0);
        let (x, y) = generate_random_data_sample(64, 2, 3, &mut rng)?;
        assert_eq!(x.shape(), vec![64, 2]);
        assert_eq!(y.shape(), vec![64, 3]);
        assert_eq!(x.dtype(), DType::F32);

        for row in y.get_f32_data()?.chunks(3) {
            assert_relative_eq!(row.iter().sum::<f32>(), 1.0);
            assert!(row.iter().all(|&v| v == 0.0 || v == 1.0));
        }
        Ok(())
    }

    #[test]
    fn test_features_scale_with_class() -> Result<(), ExtGradError> {
        let mut rng = StdRng::seed_from_u64(5);
        let (x, y) = generate_random_data_sample(2000, 1, 2, &mut rng)?;
        let x = x.get_f32_data()?;
        let y = y.get_f32_data()?;

        let (mut sums, mut counts) = ([0.0f64; 2], [0usize; 2]);
        for (i, value) in x.iter().enumerate() {
            let class = if y[i * 2] == 1.0 { 0 } else { 1 };
            sums[class] += *value as f64;
            counts[class] += 1;
        }
        // E[x | y] = 3 * (y + 1)
        assert_relative_eq!(sums[0] / counts[0] as f64, 3.0, epsilon = 0.15);
        assert_relative_eq!(sums[1] / counts[1] as f64, 6.0, epsilon = 0.3);
        Ok(())
    }

    #[test]
    fn test_same_seed_same_data() -> Result<(), ExtGradError> {
        let a = generate_random_data_sample(25, 2, 2, &mut StdRng::seed_from_u64(0))?;
        let b = generate_random_data_sample(25, 2, 2, &mut StdRng::seed_from_u64(0))?;
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
        Ok(())
    }

    #[test]
    fn test_degenerate_arguments() -> Result<(), ExtGradError> {
        let mut rng = StdRng::seed_from_u64(0);
        let (x, y) = generate_random_data_sample(0, 2, 2, &mut rng)?;
        assert_eq!(x.shape(), vec![0, 2]);
        assert_eq!(y.numel(), 0);

        assert!(matches!(
            generate_random_data_sample(4, 2, 0, &mut rng),
            Err(ExtGradError::InvalidArgument(_))
        ));
        assert!(matches!(
            generate_random_data_sample(4, 0, 2, &mut rng),
            Err(ExtGradError::InvalidArgument(_))
        ));
        Ok(())
    }

    #[test]
    fn test_dataset_access() -> Result<(), ExtGradError> {
        let data = SyntheticClassification::generate(10, 2, 2, &mut StdRng::seed_from_u64(1))?;
        assert_eq!(data.len(), 10);
        assert!(!data.is_empty());

        let (features, label) = data.get(3)?;
        assert_eq!(features.shape(), vec![2]);
        assert_eq!(label.shape(), vec![2]);
        assert_eq!(features.get_f32_data()?, data.features().get_f32_data()?[6..8].to_vec());

        assert_eq!(
            data.get(10).err(),
            Some(ExtGradError::IndexOutOfBounds {
                index: vec![10],
                shape: vec![10]
            })
        );
        Ok(())
    }

    #[test]
    fn test_rows_match_generated_batch() -> Result<(), ExtGradError> {
        let data = SyntheticClassification::generate(6, 3, 4, &mut StdRng::seed_from_u64(2))?;
        let features = data.features().get_f32_data()?;
        let labels = data.labels().get_f32_data()?;
        for i in 0..data.len() {
            let (x, y) = data.get(i)?;
            assert_eq!(x.get_f32_data()?, features[i * 3..(i + 1) * 3].to_vec());
            assert_eq!(y.get_f32_data()?, labels[i * 4..(i + 1) * 4].to_vec());
            // Rows are copies, not views of the stored batch.
            assert_ne!(x.node_id(), data.features().node_id());
        }
        Ok(())
    }
}
