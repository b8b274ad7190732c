use serde::Serialize;

use crate::model::config::{ProgressConfig, ProgressStyle};
use crate::model::line::LineKind;
use crate::model::tree::TaskTree;
use crate::ops::edit::Replacements;
use crate::ops::progress::ProgressResult;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// One node of the tree; nesting is carried by `parent` and `depth`
#[derive(Serialize)]
pub struct TreeNodeJson {
    pub line: usize,
    /// Line number of the parent node, absent for roots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    pub depth: usize,
    #[serde(flatten)]
    pub kind: LineKind,
    pub indent: usize,
    pub content: String,
}

#[derive(Serialize)]
pub struct ProgressJson {
    pub line: usize,
    pub fraction: f64,
    pub has_children: bool,
    pub content: String,
}

#[derive(Serialize)]
pub struct ChangeJson {
    pub line: usize,
    pub text: String,
}

#[derive(Serialize)]
pub struct ChangesJson {
    pub changes: Vec<ChangeJson>,
    pub repair_passes: usize,
    pub written: bool,
}

/// Flat list in document order, which is also depth-first order
pub fn tree_to_json(tree: &TaskTree) -> Vec<TreeNodeJson> {
    let depths = node_depths(tree);
    tree.nodes()
        .map(|(id, node)| TreeNodeJson {
            line: node.lnum,
            parent: node.parent.map(|p| tree.node(p).lnum),
            depth: depths[id.index()],
            kind: node.info.kind,
            indent: node.indent_level(),
            content: node.content().to_string(),
        })
        .collect()
}

/// Depth of every node, indexed by arena position. Parents precede their
/// children in the arena, so one forward sweep is enough.
fn node_depths(tree: &TaskTree) -> Vec<usize> {
    let mut depths = vec![0; tree.len()];
    for (id, node) in tree.nodes() {
        if let Some(parent) = node.parent {
            depths[id.index()] = depths[parent.index()] + 1;
        }
    }
    depths
}

pub fn changes_to_json(changes: &Replacements) -> Vec<ChangeJson> {
    changes
        .iter()
        .map(|(&line, text)| ChangeJson {
            line,
            text: text.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per node, indented by depth: `[x] Title (L3)`
pub fn format_tree(tree: &TaskTree) -> Vec<String> {
    let depths = node_depths(tree);
    tree.nodes()
        .map(|(id, node)| {
            let marker = match node.info.kind {
                LineKind::Task { done: true } => "[x]",
                LineKind::Task { done: false } => "[ ]",
                LineKind::ListItem => "-",
            };
            format!(
                "{}{} {} (L{})",
                "  ".repeat(depths[id.index()]),
                marker,
                node.content(),
                node.lnum
            )
        })
        .collect()
}

/// Render a fraction as `50%` or `[#####-----]`
pub fn format_fraction(fraction: f64, config: &ProgressConfig) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    match config.style {
        ProgressStyle::Percent => format!("{}%", (fraction * 100.0).round() as u32),
        ProgressStyle::Bar => {
            let width = config.bar_width.max(1);
            let filled = ((fraction * width as f64).round() as usize).min(width);
            format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
        }
    }
}

pub fn format_progress_line(lnum: usize, content: &str, progress: &ProgressResult, config: &ProgressConfig) -> String {
    format!("{:>4}  {}  {}", lnum, format_fraction(progress.fraction, config), content)
}

pub fn format_changes(changes: &Replacements) -> Vec<String> {
    changes
        .iter()
        .map(|(lnum, text)| format!("{:>4}: {}", lnum, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::build_tree;
    use insta::assert_snapshot;

    #[test]
    fn format_tree_nested() {
        let input = [
            "# Launch",
            "- [ ] Website",
            "  - [x] Copy",
            "  - [ ] Deploy",
            "    - check DNS",
            "- Ideas",
        ];
        let output = format_tree(&build_tree(&input)).join("\n");
        assert_snapshot!(output, @r"
        [ ] Website (L2)
          [x] Copy (L3)
          [ ] Deploy (L4)
            - check DNS (L5)
        - Ideas (L6)
        ");
    }

    #[test]
    fn test_format_fraction_percent() {
        let config = ProgressConfig::default();
        assert_eq!(format_fraction(0.0, &config), "0%");
        assert_eq!(format_fraction(0.5, &config), "50%");
        assert_eq!(format_fraction(2.0 / 3.0, &config), "67%");
        assert_eq!(format_fraction(1.0, &config), "100%");
    }

    #[test]
    fn test_format_fraction_bar() {
        let config = ProgressConfig {
            style: ProgressStyle::Bar,
            bar_width: 4,
            show_all: false,
        };
        assert_eq!(format_fraction(0.0, &config), "[----]");
        assert_eq!(format_fraction(0.5, &config), "[##--]");
        assert_eq!(format_fraction(1.0, &config), "[####]");
    }

    #[test]
    fn test_tree_json_shape() {
        let tree = build_tree(&["- [x] a", "  - b"]);
        let json = serde_json::to_value(tree_to_json(&tree)).unwrap();
        assert_eq!(json[0]["line"], 1);
        assert_eq!(json[0]["kind"], "task");
        assert_eq!(json[0]["done"], true);
        assert!(json[0].get("parent").is_none());
        assert_eq!(json[1]["kind"], "list_item");
        assert_eq!(json[1]["content"], "b");
        assert_eq!(json[1]["parent"], 1);
        assert_eq!(json[1]["depth"], 1);
    }

    #[test]
    fn test_deeply_nested_tree_renders() {
        let input: Vec<String> = (0..5_000).map(|i| format!("{}- [ ] t", " ".repeat(i))).collect();
        let tree = build_tree(&input);

        let text = format_tree(&tree);
        assert_eq!(text.len(), 5_000);
        assert_eq!(text[4_999], format!("{}[ ] t (L5000)", "  ".repeat(4_999)));

        let json = serde_json::to_value(tree_to_json(&tree)).unwrap();
        assert_eq!(json[4_999]["depth"], 4_999);
        assert_eq!(json[4_999]["parent"], 4_999);
    }
}
