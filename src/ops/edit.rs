use std::collections::BTreeMap;

use crate::model::line::ParsedLineInfo;
use crate::model::tree::{NodeId, TaskTree};
use crate::parse::classify_line;

/// Staged line rewrites: 1-based line number → full replacement text
pub type Replacements = BTreeMap<usize, String>;

/// Rewrite the checkbox character of a task line.
///
/// Writes `x` for done and a space for not-done; every other byte of the
/// line is preserved. Returns `None` when the line is not a task.
pub fn set_checkbox(line: &str, done: bool) -> Option<String> {
    let info = classify_line(line)?;
    let range = info.checkbox?;
    let mark = if done { 'x' } else { ' ' };
    let mut out = String::with_capacity(line.len());
    out.push_str(&line[..range.start]);
    out.push(mark);
    out.push_str(&line[range.end..]);
    Some(out)
}

/// Turn a plain list item into a task by inserting a checkbox at its
/// content start. Returns `None` for tasks and non-list lines.
pub fn promote_line(line: &str, done: bool) -> Option<String> {
    let info = classify_line(line)?;
    if info.is_task() {
        return None;
    }
    let at = info.content_offset();
    let checkbox = if done { "[x] " } else { "[ ] " };
    let mut out = String::with_capacity(line.len() + checkbox.len());
    out.push_str(&line[..at]);
    out.push_str(checkbox);
    out.push_str(&line[at..]);
    Some(out)
}

/// Apply staged replacements to a document, returning the new lines.
/// Line numbers outside the document are ignored.
pub fn apply_replacements<S: AsRef<str>>(lines: &[S], replacements: &Replacements) -> Vec<String> {
    let mut out: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
    for (&lnum, text) in replacements {
        match lnum.checked_sub(1).and_then(|idx| out.get_mut(idx)) {
            Some(slot) => *slot = text.clone(),
            None => log::debug!("ignoring replacement for out-of-range line {}", lnum),
        }
    }
    out
}

/// Line-level view of "the document after the edits staged so far".
///
/// Reads fall back to the tree's original text when nothing is staged for a
/// line, so chained effects inside one operation see each other without an
/// intermediate rebuild.
#[derive(Debug)]
pub struct FutureLines<'a> {
    tree: &'a TaskTree,
    staged: Replacements,
}

impl<'a> FutureLines<'a> {
    pub fn new(tree: &'a TaskTree) -> Self {
        FutureLines {
            tree,
            staged: Replacements::new(),
        }
    }

    pub fn tree(&self) -> &'a TaskTree {
        self.tree
    }

    /// Current text of a node's line
    pub fn text(&self, id: NodeId) -> &str {
        let node = self.tree.node(id);
        self.staged
            .get(&node.lnum)
            .map(String::as_str)
            .unwrap_or(&node.text)
    }

    /// Re-classify a node's line as it would read after staged edits
    pub fn info(&self, id: NodeId) -> Option<ParsedLineInfo> {
        classify_line(self.text(id))
    }

    pub fn is_task(&self, id: NodeId) -> bool {
        self.info(id).is_some_and(|i| i.is_task())
    }

    pub fn is_done(&self, id: NodeId) -> bool {
        self.info(id).is_some_and(|i| i.is_done())
    }

    /// True when the node has at least one direct task child and every
    /// one of them is done
    pub fn task_children_all_done(&self, id: NodeId) -> bool {
        let mut any = false;
        for &child in self.tree.children(id) {
            if let Some(info) = self.info(child)
                && info.is_task()
            {
                if !info.is_done() {
                    return false;
                }
                any = true;
            }
        }
        any
    }

    /// Stage a full-line replacement; a no-op rewrite is dropped
    pub fn stage(&mut self, id: NodeId, text: String) {
        let node = self.tree.node(id);
        if text == node.text {
            self.staged.remove(&node.lnum);
        } else {
            self.staged.insert(node.lnum, text);
        }
    }

    /// Set a task's done state. Returns false if the line is not a task.
    pub fn set_done(&mut self, id: NodeId, done: bool) -> bool {
        match set_checkbox(self.text(id), done) {
            Some(text) => {
                self.stage(id, text);
                true
            }
            None => false,
        }
    }

    /// Promote a plain list item. Returns false if it is not one.
    pub fn promote(&mut self, id: NodeId, done: bool) -> bool {
        match promote_line(self.text(id), done) {
            Some(text) => {
                self.stage(id, text);
                true
            }
            None => false,
        }
    }

    pub fn into_replacements(self) -> Replacements {
        self.staged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::build_tree;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_checkbox_preserves_everything_else() {
        assert_eq!(set_checkbox("  * [ ] keep  spacing  ", true).unwrap(), "  * [x] keep  spacing  ");
        assert_eq!(set_checkbox("1) [x] ordered", false).unwrap(), "1) [ ] ordered");
        assert_eq!(set_checkbox("-  [-] odd state", true).unwrap(), "-  [x] odd state");
        assert_eq!(set_checkbox("- [ ] [ ] literal box in text", true).unwrap(), "- [x] [ ] literal box in text");
        assert_eq!(set_checkbox("- plain", true), None);
        assert_eq!(set_checkbox("text", true), None);
    }

    #[test]
    fn test_set_checkbox_multibyte() {
        assert_eq!(set_checkbox("- [✓] fancy", true).unwrap(), "- [x] fancy");
        assert_eq!(set_checkbox("- [✓] fancy", false).unwrap(), "- [ ] fancy");
    }

    #[test]
    fn test_promote_line() {
        assert_eq!(promote_line("  - plain item", false).unwrap(), "  - [ ] plain item");
        assert_eq!(promote_line("3.  spaced", true).unwrap(), "3.  [x] spaced");
        assert_eq!(promote_line("- [ ] already", false), None);
        assert_eq!(promote_line("# heading", false), None);
    }

    #[test]
    fn test_apply_replacements() {
        let lines = vec!["a", "b", "c"];
        let mut r = Replacements::new();
        r.insert(2, "B".to_string());
        r.insert(9, "ignored".to_string());
        r.insert(0, "ignored".to_string());
        assert_eq!(apply_replacements(&lines, &r), vec!["a", "B", "c"]);
    }

    #[test]
    fn test_future_lines_reads_staged_state() {
        let lines = vec!["- [ ] parent", "  - [ ] child", "  - plain"];
        let tree = build_tree(&lines);
        let parent = tree.id_at(1).unwrap();
        let child = tree.id_at(2).unwrap();
        let plain = tree.id_at(3).unwrap();

        let mut view = FutureLines::new(&tree);
        assert!(!view.task_children_all_done(parent));
        assert!(view.set_done(child, true));
        assert!(view.is_done(child));
        assert!(view.task_children_all_done(parent));
        assert!(!view.set_done(plain, true));

        // Reverting to the original text drops the staged entry
        assert!(view.set_done(child, false));
        assert!(view.into_replacements().is_empty());
    }
}
