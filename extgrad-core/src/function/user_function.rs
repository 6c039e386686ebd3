use crate::device::StorageDevice;
use crate::error::ExtGradError;
use crate::tensor::Tensor;
use crate::types::DType;
use std::collections::{BTreeMap, BTreeSet};

/// Output index to output value. Passed to `forward` with every slot empty.
pub type OutputSlots = BTreeMap<usize, Option<Tensor>>;

/// Input index to gradient. Passed to `backward` with one empty slot per input
/// that requires a gradient.
pub type GradientSlots = BTreeMap<usize, Option<Tensor>>;

/// Output index to the gradient of the loss with respect to that output.
pub type RootGradients = BTreeMap<usize, Tensor>;

/// Shape and element type of a graph variable.
///
/// The leading dimension of `shape` is the batch axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableSpec {
    pub shape: Vec<usize>,
    pub dtype: DType,
}

impl VariableSpec {
    pub fn new(shape: Vec<usize>, dtype: DType) -> Self {
        VariableSpec { shape, dtype }
    }

    /// Describes an existing tensor.
    pub fn of(tensor: &Tensor) -> Self {
        VariableSpec {
            shape: tensor.shape(),
            dtype: tensor.dtype(),
        }
    }
}

/// A custom computation node with caller-supplied forward and backward.
///
/// Each application runs `forward` once and returns a `State`. The state is
/// stored on the graph node and handed by value to `backward`, so it is
/// consumed by the first backward pass through that application. Nothing is
/// shared between applications except what the implementor keeps on `self`.
///
/// Functions have a single output, at index 0.
pub trait UserFunction: Send + Sync + 'static {
    /// Data captured in `forward` for use in `backward`.
    type State: Send + 'static;

    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Declares the output variable for the given inputs.
    ///
    /// Called before `forward`. Structural checks such as input arity belong
    /// here; the filled output is validated against the returned spec.
    fn infer_output(&self, inputs: &[VariableSpec]) -> Result<VariableSpec, ExtGradError>;

    /// Computes the output from `inputs` and fills every slot of `outputs`.
    ///
    /// `inputs` are detached from the graph. `outputs_to_retain` lists the
    /// outputs a later backward may need; it is empty when no gradient will be
    /// requested.
    fn forward(
        &self,
        inputs: &[Tensor],
        outputs: &mut OutputSlots,
        device: StorageDevice,
        outputs_to_retain: &BTreeSet<usize>,
    ) -> Result<Self::State, ExtGradError>;

    /// Fills every slot of `variables` with the gradient for that input.
    fn backward(
        &self,
        state: Self::State,
        root_gradients: &RootGradients,
        variables: &mut GradientSlots,
    ) -> Result<(), ExtGradError>;
}
