use crate::error::ExtGradError;
use crate::tensor::{NodeId, Tensor};
use std::collections::HashSet;

/// Orders the graph reachable from `root` so that every node comes before the
/// inputs it was computed from.
///
/// The first element is `root` itself. Leaves come last. Traversal follows
/// `grad_fn.inputs()`, so only nodes recorded for autograd are visited.
///
/// # Errors
/// Returns `ExtGradError::CycleDetected` if a node is reachable from itself.
pub fn topological_sort(root: &Tensor) -> Result<Vec<Tensor>, ExtGradError> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut in_progress: HashSet<NodeId> = HashSet::new();
    let mut post_order: Vec<Tensor> = Vec::new();

    visit(root, &mut visited, &mut in_progress, &mut post_order)?;

    post_order.reverse();
    log::debug!("topological_sort: {} nodes", post_order.len());
    Ok(post_order)
}

fn visit(
    node: &Tensor,
    visited: &mut HashSet<NodeId>,
    in_progress: &mut HashSet<NodeId>,
    post_order: &mut Vec<Tensor>,
) -> Result<(), ExtGradError> {
    let id = node.node_id();
    if visited.contains(&id) {
        return Ok(());
    }
    if !in_progress.insert(id) {
        return Err(ExtGradError::CycleDetected);
    }

    if let Some(grad_fn) = node.grad_fn() {
        for input in grad_fn.inputs() {
            visit(&input, visited, in_progress, post_order)?;
        }
    }

    in_progress.remove(&id);
    visited.insert(id);
    post_order.push(node.clone());
    Ok(())
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
