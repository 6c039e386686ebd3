// src/tensor/create.rs

use crate::error::ExtGradError;
use crate::tensor::Tensor;
use crate::types::DType;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

/// Creates an `f32` tensor filled with zeros.
pub fn zeros(shape: &[usize]) -> Result<Tensor, ExtGradError> {
    full(shape, 0.0)
}

/// Creates an `f64` tensor filled with zeros.
pub fn zeros_f64(shape: &[usize]) -> Result<Tensor, ExtGradError> {
    full_f64(shape, 0.0)
}

/// Creates an `f32` tensor filled with ones.
pub fn ones(shape: &[usize]) -> Result<Tensor, ExtGradError> {
    full(shape, 1.0)
}

/// Creates an `f64` tensor filled with ones.
pub fn ones_f64(shape: &[usize]) -> Result<Tensor, ExtGradError> {
    full_f64(shape, 1.0)
}

/// Creates an `f32` tensor where every element is `value`.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, ExtGradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates an `f64` tensor where every element is `value`.
pub fn full_f64(shape: &[usize], value: f64) -> Result<Tensor, ExtGradError> {
    let numel = shape.iter().product();
    Tensor::new_f64(vec![value; numel], shape.to_vec())
}

pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, ExtGradError> {
    Tensor::new(data_vec, shape)
}

pub fn from_vec_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Tensor, ExtGradError> {
    Tensor::new_f64(data_vec, shape)
}

/// Creates a tensor with the same shape and dtype as `tensor`, filled with
/// `value` (converted to the tensor's dtype).
pub fn full_like(tensor: &Tensor, value: f64) -> Result<Tensor, ExtGradError> {
    let shape = tensor.shape();
    match tensor.dtype() {
        DType::F32 => full(&shape, value as f32),
        DType::F64 => full_f64(&shape, value),
    }
}

pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, ExtGradError> {
    full_like(tensor, 0.0)
}

pub fn ones_like(tensor: &Tensor) -> Result<Tensor, ExtGradError> {
    full_like(tensor, 1.0)
}

/// Samples an `f32` tensor from the standard normal distribution.
pub fn randn<R: Rng + ?Sized>(shape: Vec<usize>, rng: &mut R) -> Result<Tensor, ExtGradError> {
    let numel = shape.iter().product();
    let data: Vec<f32> = (0..numel).map(|_| StandardNormal.sample(rng)).collect();
    Tensor::new(data, shape)
}

/// Samples a tensor uniformly from `[low, high)` with the requested dtype.
///
/// # Errors
/// Returns `ExtGradError::InvalidArgument` if `low >= high`.
pub fn uniform<R: Rng + ?Sized>(
    shape: Vec<usize>,
    low: f64,
    high: f64,
    dtype: DType,
    rng: &mut R,
) -> Result<Tensor, ExtGradError> {
    if !(low < high) {
        return Err(ExtGradError::InvalidArgument(format!(
            "uniform requires low < high, got [{}, {})",
            low, high
        )));
    }
    let numel = shape.iter().product();
    match dtype {
        DType::F32 => {
            let dist = Uniform::new(low as f32, high as f32);
            let data: Vec<f32> = (0..numel).map(|_| dist.sample(rng)).collect();
            Tensor::new(data, shape)
        }
        DType::F64 => {
            let dist = Uniform::new(low, high);
            let data: Vec<f64> = (0..numel).map(|_| dist.sample(rng)).collect();
            Tensor::new_f64(data, shape)
        }
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
