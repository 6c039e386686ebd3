#[cfg(test)]
mod tests {
    use crate::error::ExtGradError;
    use crate::model::Sequential;
    use crate::nn::{Linear, Module, Sigmoid};
    use crate::tensor::Tensor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_layer() -> Result<Sequential, ExtGradError> {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seq = Sequential::new();
        seq.add_module("fc1", Box::new(Linear::new(4, 3, true, &mut rng)?))?;
        seq.add_module("act", Box::new(Sigmoid::new()))?;
        seq.add_module("fc2", Box::new(Linear::new(3, 2, true, &mut rng)?))?;
        Ok(seq)
    }

    #[test]
    fn test_sequential_forward_and_structure() -> Result<(), ExtGradError> {
        let seq = two_layer()?;
        let x = Tensor::new(vec![0.5; 8], vec![2, 4])?;
        assert_eq!(seq.forward(&x)?.shape(), vec![2, 2]);

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.parameters().len(), 4);
        let names: Vec<String> = seq.named_parameters().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["fc1.weight", "fc1.bias", "fc2.weight", "fc2.bias"]);
        let children: Vec<String> = seq.named_children().into_iter().map(|(n, _)| n).collect();
        assert_eq!(children, vec!["fc1", "act", "fc2"]);
        assert_eq!(seq.modules().len(), 4);
        assert!(seq.get("act").is_some());
        Ok(())
    }

    #[test]
    fn test_sequential_rejects_duplicate_names() -> Result<(), ExtGradError> {
        let mut seq = two_layer()?;
        assert!(matches!(
            seq.add_module("fc1", Box::new(Sigmoid::new())),
            Err(ExtGradError::InvalidArgument(_))
        ));
        Ok(())
    }
}
