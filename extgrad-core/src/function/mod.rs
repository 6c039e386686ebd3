//! User-defined function nodes.
//!
//! A [`UserFunction`] supplies its own forward and backward computation. When
//! applied with [`apply_user_function`] it becomes an ordinary node of the
//! recorded graph: its output carries a `grad_fn` and `Tensor::backward`
//! drives its backward exactly once per pass.
//!
//! Two functions ship with the crate: [`UserSigmoid`] and [`PlusShift`].

mod node;
mod shift;
mod sigmoid;
mod user_function;

pub use node::apply_user_function;
pub use shift::PlusShift;
pub use sigmoid::UserSigmoid;
pub use user_function::{GradientSlots, OutputSlots, RootGradients, UserFunction, VariableSpec};
