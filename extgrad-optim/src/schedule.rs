use extgrad_core::ExtGradError;

/// What a learning-rate value is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitType {
    /// The rate applies to the gradient of each sample.
    #[default]
    Sample,
    /// The rate applies to a whole minibatch; the per-sample rate is
    /// `rate / minibatch_size`.
    Minibatch,
}

/// Learning rates as a function of the number of samples seen.
///
/// Value `i` applies to samples `[i * epoch_size, (i + 1) * epoch_size)`; the
/// last value holds from then on. A constant schedule has a single value.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningRateSchedule {
    values: Vec<f64>,
    epoch_size: usize,
    unit: UnitType,
}

impl LearningRateSchedule {
    pub fn constant(rate: f64, unit: UnitType) -> Result<Self, ExtGradError> {
        Self::piecewise(vec![rate], 1, unit)
    }

    /// # Errors
    /// Returns `InvalidArgument` if `values` is empty, `epoch_size` is zero
    /// or a rate is negative or not finite.
    pub fn piecewise(
        values: Vec<f64>,
        epoch_size: usize,
        unit: UnitType,
    ) -> Result<Self, ExtGradError> {
        if values.is_empty() {
            return Err(ExtGradError::InvalidArgument(
                "a learning-rate schedule needs at least one value".to_string(),
            ));
        }
        if epoch_size == 0 {
            return Err(ExtGradError::InvalidArgument(
                "learning-rate epoch size must be non-zero".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(ExtGradError::InvalidArgument(format!(
                "invalid learning rate: {}",
                bad
            )));
        }
        Ok(LearningRateSchedule {
            values,
            epoch_size,
            unit,
        })
    }

    pub fn unit(&self) -> UnitType {
        self.unit
    }

    /// The scheduled value after `samples_seen` samples, in the schedule's unit.
    pub fn value_at(&self, samples_seen: usize) -> f64 {
        let index = (samples_seen / self.epoch_size).min(self.values.len() - 1);
        self.values[index]
    }

    /// The per-sample rate after `samples_seen` samples, for a minibatch of
    /// `minibatch_size` samples.
    pub fn per_sample_rate(&self, samples_seen: usize, minibatch_size: usize) -> f64 {
        let value = self.value_at(samples_seen);
        match self.unit {
            UnitType::Sample => value,
            UnitType::Minibatch if minibatch_size == 0 => 0.0,
            UnitType::Minibatch => value / minibatch_size as f64,
        }
    }
}

#[cfg(test)]
#[path = "schedule_test.rs"]
mod tests;
