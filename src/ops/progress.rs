use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::tree::{NodeId, TaskTree};

/// Completion of one node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressResult {
    /// 0.0 ..= 1.0
    pub fraction: f64,
    /// The node has children of any kind (tasks or plain items). Hosts that
    /// expect a `has_task_children` flag read this field.
    #[doc(alias = "has_task_children")]
    pub has_children: bool,
}

/// Aggregate over a node's direct task children
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChildTaskStats {
    pub total_progress: f64,
    pub task_child_count: usize,
    /// Every task child is done, and there is at least one
    pub all_done: bool,
}

/// Progress of a node: its own checkbox when it has no task children,
/// otherwise the mean progress of its task children.
pub fn compute_progress(tree: &TaskTree, id: NodeId) -> ProgressResult {
    let node = tree.node(id);
    let own = if node.is_task() && node.is_done() { 1.0 } else { 0.0 };
    if !node.has_children() {
        return ProgressResult {
            fraction: own,
            has_children: false,
        };
    }

    let stats = child_task_stats(tree, id);
    if stats.task_child_count == 0 {
        return ProgressResult {
            fraction: own,
            has_children: true,
        };
    }
    ProgressResult {
        fraction: stats.total_progress / stats.task_child_count as f64,
        has_children: true,
    }
}

/// Sum of progress over direct task children. Plain list children are
/// skipped entirely, including whatever tasks sit below them.
pub fn child_task_stats(tree: &TaskTree, id: NodeId) -> ChildTaskStats {
    let fractions = subtree_fractions(tree, id);
    let mut stats = ChildTaskStats {
        all_done: true,
        ..Default::default()
    };
    for &child in tree.children(id) {
        let node = tree.node(child);
        if !node.is_task() {
            continue;
        }
        stats.total_progress += fractions[child.index()];
        stats.task_child_count += 1;
        stats.all_done &= node.is_done();
    }
    stats.all_done &= stats.task_child_count > 0;
    stats
}

/// Progress for every node, keyed by line number.
///
/// Children always sit on later lines than their parent, so walking the
/// arena backwards lets each parent reuse its children's results.
pub fn progress_by_line(tree: &TaskTree) -> BTreeMap<usize, ProgressResult> {
    let mut fractions = vec![0.0; tree.len()];
    let mut out = BTreeMap::new();

    for id in tree.ids().rev() {
        let node = tree.node(id);
        let fraction = fraction_from_children(tree, id, &fractions);
        fractions[id.index()] = fraction;
        out.insert(
            node.lnum,
            ProgressResult {
                fraction,
                has_children: node.has_children(),
            },
        );
    }
    out
}

/// Fractions for every node below `root`, indexed by arena position.
///
/// Filled in reverse preorder so each node's children are known before the
/// node itself; stack depth stays flat however deep the nesting goes.
fn subtree_fractions(tree: &TaskTree, root: NodeId) -> Vec<f64> {
    let mut fractions = vec![0.0; tree.len()];
    for id in tree.descendants(root).into_iter().rev() {
        fractions[id.index()] = fraction_from_children(tree, id, &fractions);
    }
    fractions
}

/// Mean of the task children's fractions, or the node's own checkbox
fn fraction_from_children(tree: &TaskTree, id: NodeId, fractions: &[f64]) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for &child in tree.children(id) {
        if tree.node(child).is_task() {
            total += fractions[child.index()];
            count += 1;
        }
    }
    if count == 0 {
        if tree.node(id).is_done() { 1.0 } else { 0.0 }
    } else {
        total / count as f64
    }
}
