use std::collections::BTreeMap;

use crate::model::tree::{NodeId, TaskNode, TaskTree};
use crate::parse::classify_line;

/// Build the task forest for a whole document.
///
/// Line numbers are 1-based. Nesting is decided purely by indentation: a
/// node's parent is the most recent node at the nearest shallower indent.
pub fn build_tree<S: AsRef<str>>(lines: &[S]) -> TaskTree {
    let mut tree = TaskTree::with_line_count(lines.len());

    // Pass 1: one node per list/task line
    for (idx, line) in lines.iter().enumerate() {
        let text = line.as_ref();
        if let Some(info) = classify_line(text) {
            tree.push_node(TaskNode {
                lnum: idx + 1,
                text: text.to_string(),
                info,
                parent: None,
                children: Vec::new(),
            });
        }
    }

    // Pass 2: link parents. Arena order is document order.
    let mut last_seen_at_level: BTreeMap<usize, NodeId> = BTreeMap::new();
    for id in tree.ids().collect::<Vec<_>>() {
        let level = tree.node(id).indent_level();
        last_seen_at_level.insert(level, id);
        // Deeper entries belong to a closed branch
        last_seen_at_level.retain(|&l, _| l <= level);

        let parent = last_seen_at_level
            .range(..level)
            .next_back()
            .map(|(_, &p)| p);
        tree.attach(id, parent);
    }

    log::debug!(
        "built task tree: {} lines, {} nodes, {} roots",
        tree.line_count(),
        tree.len(),
        tree.roots().len()
    );
    tree
}
