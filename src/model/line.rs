use serde::Serialize;
use std::ops::Range;

/// What a single line of markdown turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    /// A list item carrying a checkbox: `- [ ] text`
    Task { done: bool },
    /// A bullet or ordered item without a checkbox: `- text`, `1. text`
    ListItem,
}

/// Classification result for one list or task line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLineInfo {
    pub kind: LineKind,
    /// Count of leading whitespace characters before the marker
    pub indent_level: usize,
    /// 1-based column where the item's display text begins
    pub content_start_column: usize,
    /// Byte range of the character between the checkbox brackets (tasks only)
    pub checkbox: Option<Range<usize>>,
}

impl ParsedLineInfo {
    pub fn is_task(&self) -> bool {
        matches!(self.kind, LineKind::Task { .. })
    }

    /// Done state of a task; always false for plain list items
    pub fn is_done(&self) -> bool {
        matches!(self.kind, LineKind::Task { done: true })
    }

    /// Byte offset of the first content character
    pub fn content_offset(&self) -> usize {
        self.content_start_column - 1
    }
}
