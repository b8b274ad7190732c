use std::collections::BTreeMap;

use super::line::ParsedLineInfo;

/// Handle to a node inside a [`TaskTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A list or task line, positioned in the tree
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    /// 1-based line number in the document
    pub lnum: usize,
    /// The original line text
    pub text: String,
    pub info: ParsedLineInfo,
    /// Non-owning back-reference; `None` for roots
    pub parent: Option<NodeId>,
    /// Children in document order
    pub children: Vec<NodeId>,
}

impl TaskNode {
    pub fn is_task(&self) -> bool {
        self.info.is_task()
    }

    pub fn is_done(&self) -> bool {
        self.info.is_done()
    }

    pub fn indent_level(&self) -> usize {
        self.info.indent_level
    }

    pub fn content_start_column(&self) -> usize {
        self.info.content_start_column
    }

    /// Display text after the marker (and checkbox)
    pub fn content(&self) -> &str {
        self.text.get(self.info.content_offset()..).unwrap_or("")
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Forest of list/task nodes built from one document snapshot.
///
/// Nodes live in an arena in document order, so a node's `NodeId` ordering
/// matches its line number ordering. The tree is only valid for the text it
/// was built from; any edit means building a new one.
#[derive(Debug, Clone, Default)]
pub struct TaskTree {
    pub(crate) nodes: Vec<TaskNode>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) by_lnum: BTreeMap<usize, NodeId>,
    pub(crate) line_count: usize,
}

impl TaskTree {
    /// Number of lines in the snapshot this tree was built from
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &TaskNode {
        &self.nodes[id.0]
    }

    /// Look up the node on a given line, if that line is a list item
    pub fn get(&self, lnum: usize) -> Option<&TaskNode> {
        self.id_at(lnum).map(|id| self.node(id))
    }

    pub fn id_at(&self, lnum: usize) -> Option<NodeId> {
        self.by_lnum.get(&lnum).copied()
    }

    /// All node ids in document order
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TaskNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Every node below `id`, depth-first in document order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            out.push(p);
            current = self.parent(p);
        }
        out
    }

    /// Nesting depth (0 = root)
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    // --- Construction (used by the tree builder) ---

    pub(crate) fn with_line_count(line_count: usize) -> Self {
        TaskTree {
            line_count,
            ..Default::default()
        }
    }

    pub(crate) fn push_node(&mut self, node: TaskNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.by_lnum.insert(node.lnum, id);
        self.nodes.push(node);
        id
    }

    pub(crate) fn attach(&mut self, child: NodeId, parent: Option<NodeId>) {
        match parent {
            Some(p) => {
                self.nodes[child.0].parent = Some(p);
                self.nodes[p.0].children.push(child);
            }
            None => self.roots.push(child),
        }
    }
}
