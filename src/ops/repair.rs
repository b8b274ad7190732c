use crate::model::tree::TaskTree;
use crate::ops::edit::{Replacements, set_checkbox};

/// Compute the edits that bring every parent task in line with its
/// task children.
///
/// A task with at least one task child must be done exactly when all of
/// those children are done. Leaf tasks, and tasks whose children are all
/// plain list items, keep their own state.
///
/// Nodes are visited bottom-up (descending line number) and each decision
/// reads the children's corrected state, so corrections ripple through any
/// number of levels in a single pass and a second pass finds nothing.
pub fn repair(tree: &TaskTree) -> Replacements {
    let mut effective: Vec<bool> = tree.nodes().map(|(_, n)| n.is_done()).collect();
    let mut out = Replacements::new();

    for id in tree.ids().rev() {
        let node = tree.node(id);
        if !node.is_task() {
            continue;
        }

        let mut task_children = 0usize;
        let mut all_done = true;
        for &child in tree.children(id) {
            if tree.node(child).is_task() {
                task_children += 1;
                all_done &= effective[child.index()];
            }
        }
        if task_children == 0 {
            continue;
        }

        if all_done != node.is_done() {
            effective[id.index()] = all_done;
            if let Some(text) = set_checkbox(&node.text, all_done) {
                out.insert(node.lnum, text);
            }
        }
    }

    if !out.is_empty() {
        log::debug!("repair staged {} line(s)", out.len());
    }
    out
}
