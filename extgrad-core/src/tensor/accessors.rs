use crate::error::ExtGradError;
use crate::tensor::Tensor;
use crate::types::DType;

impl Tensor {
    /// Copies the elements out as a `Vec<f32>`.
    ///
    /// # Errors
    /// Returns `ExtGradError::DataTypeMismatch` if the tensor is not `F32`.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, ExtGradError> {
        let guard = self.read_data();
        Ok(guard.buffer().try_get_cpu_f32()?.as_ref().clone())
    }

    /// Copies the elements out as a `Vec<f64>`.
    ///
    /// # Errors
    /// Returns `ExtGradError::DataTypeMismatch` if the tensor is not `F64`.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, ExtGradError> {
        let guard = self.read_data();
        Ok(guard.buffer().try_get_cpu_f64()?.as_ref().clone())
    }

    /// Copies the elements out, widening `F32` to `f64`.
    pub fn to_f64_vec(&self) -> Result<Vec<f64>, ExtGradError> {
        match self.dtype() {
            DType::F32 => Ok(self.get_f32_data()?.into_iter().map(f64::from).collect()),
            DType::F64 => self.get_f64_data(),
        }
    }

    /// Returns the single value of a one-element tensor as `f64`.
    ///
    /// # Errors
    /// Returns `ExtGradError::ShapeMismatch` if the tensor holds more or less
    /// than one element.
    pub fn item_f64(&self) -> Result<f64, ExtGradError> {
        let values = self.to_f64_vec()?;
        if values.len() != 1 {
            return Err(ExtGradError::ShapeMismatch {
                expected: "a single element".to_string(),
                actual: format!("{:?}", self.shape()),
                operation: "item".to_string(),
            });
        }
        Ok(values[0])
    }
}
