//! Eager reverse-mode automatic differentiation.
//!
//! Every differentiable operation stores an `Arc<dyn BackwardOp>` in the
//! `grad_fn` of its output. `Tensor::backward` walks those nodes in reverse
//! topological order and accumulates gradients on the leaves.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::BackwardOp;
pub use graph::topological_sort;
