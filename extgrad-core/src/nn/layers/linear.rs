use crate::error::ExtGradError;
use crate::nn::init::glorot_uniform;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::arithmetic::add_op;
use crate::ops::linalg::{matmul_op, transpose_op};
use crate::tensor::{zeros, zeros_f64, Tensor};
use crate::types::DType;
use rand::Rng;

/// Applies an affine transformation to the incoming data: `y = x W^T + b`.
///
/// `x` is `[batch, in_features]`, `W` is `[out_features, in_features]` and
/// `b` is `[out_features]`.
#[derive(Debug)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates an `F32` layer with Glorot-uniform weights and a zero bias.
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self, ExtGradError> {
        Self::new_with_dtype(in_features, out_features, has_bias, DType::F32, rng)
    }

    pub fn new_with_dtype<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        dtype: DType,
        rng: &mut R,
    ) -> Result<Self, ExtGradError> {
        let weight_tensor = glorot_uniform(&[out_features, in_features], dtype, rng)?;
        let weight = Parameter::new(weight_tensor, Some("weight".to_string()));
        let bias = if has_bias {
            let bias_tensor = match dtype {
                DType::F32 => zeros(&[out_features])?,
                DType::F64 => zeros_f64(&[out_features])?,
            };
            Some(Parameter::new(bias_tensor, Some("bias".to_string())))
        } else {
            None
        };
        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    /// # Errors
    /// Returns `ShapeMismatch` if the input is not `[batch, in_features]`.
    fn forward(&self, input: &Tensor) -> Result<Tensor, ExtGradError> {
        let input_shape = input.shape();
        if input_shape.len() != 2 || input_shape[1] != self.in_features {
            return Err(ExtGradError::ShapeMismatch {
                expected: format!("[batch, {}]", self.in_features),
                actual: format!("{:?}", input_shape),
                operation: "Linear::forward".to_string(),
            });
        }
        let output = matmul_op(input, &transpose_op(&self.weight)?)?;
        match &self.bias {
            Some(bias) => add_op(&output, bias),
            None => Ok(output),
        }
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = vec![&self.weight];
        if let Some(bias) = &self.bias {
            params.push(bias);
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = vec![("weight".to_string(), &self.weight)];
        if let Some(bias) = &self.bias {
            params.push(("bias".to_string(), bias));
        }
        params
    }

    fn modules(&self) -> Vec<&dyn Module> {
        vec![self]
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
