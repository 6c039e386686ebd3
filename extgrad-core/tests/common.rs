use extgrad_core::tensor::Tensor;

#[allow(dead_code)]
pub fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub fn create_test_tensor_with_grad(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    create_test_tensor(data, shape)
        .requires_grad_()
        .expect("Failed to set requires_grad")
}
