use extgrad_optim::TrainingConfig;

/// The configuration both equivalence runs share.
#[allow(dead_code)]
pub fn equivalence_config() -> TrainingConfig {
    TrainingConfig::default()
}

#[allow(dead_code)]
pub fn assert_allclose(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len(), "trajectories differ in length");
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!(
            approx::relative_eq!(x, y, epsilon = 1e-8, max_relative = 1e-5),
            "mismatch at index {}: {} vs {}",
            i,
            x,
            y
        );
    }
}
