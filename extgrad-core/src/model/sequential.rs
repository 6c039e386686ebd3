use crate::error::ExtGradError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;
use std::collections::BTreeMap;

/// Runs named child modules one after another.
#[derive(Debug, Default)]
pub struct Sequential {
    modules: Vec<Box<dyn Module>>,
    names: Vec<String>,
    named_modules: BTreeMap<String, usize>,
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `module` under `name`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `name` is already taken.
    pub fn add_module(&mut self, name: &str, module: Box<dyn Module>) -> Result<(), ExtGradError> {
        if self.named_modules.contains_key(name) {
            return Err(ExtGradError::InvalidArgument(format!(
                "duplicate module name '{}'",
                name
            )));
        }
        let index = self.modules.len();
        self.modules.push(module);
        self.names.push(name.to_string());
        self.named_modules.insert(name.to_string(), index);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Module> {
        self.named_modules
            .get(name)
            .and_then(|&index| self.modules.get(index))
            .map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Sequential {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ExtGradError> {
        let mut current = input.clone();
        for module in &self.modules {
            current = module.forward(&current)?;
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.modules.iter().flat_map(|m| m.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = Vec::new();
        for (name, module) in self.names.iter().zip(&self.modules) {
            for (param_name, param) in module.named_parameters() {
                params.push((format!("{}.{}", name, param_name), param));
            }
        }
        params
    }

    fn children(&self) -> Vec<&dyn Module> {
        self.modules.iter().map(|m| m.as_ref()).collect()
    }

    /// Children in insertion order.
    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        self.names
            .iter()
            .cloned()
            .zip(self.modules.iter().map(|m| m.as_ref()))
            .collect()
    }

    fn modules(&self) -> Vec<&dyn Module> {
        let mut all_modules = vec![self as &dyn Module];
        for module in &self.modules {
            all_modules.extend(module.modules());
        }
        all_modules
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
