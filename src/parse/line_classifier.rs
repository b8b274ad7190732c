use crate::model::line::{LineKind, ParsedLineInfo};

/// Classify one line as a task, a plain list item, or neither.
///
/// Grammar, tried in order:
/// - task: `<ws>* <marker> <ws>* [<c>] <ws>+ <content>`
/// - list item: `<ws>* <marker> <ws>+ <content>`
///
/// where `<marker>` is `*`, `-`, `+`, or ASCII digits followed by `.` or `)`,
/// and `<ws>` is a space or tab. The checkbox is done only for a literal `x`.
pub fn classify_line(line: &str) -> Option<ParsedLineInfo> {
    let indent = count_indent(line);
    let rest = &line[indent..];
    let marker = marker_len(rest)?;
    let after_marker = indent + marker;

    if let Some(info) = classify_task(line, indent, after_marker) {
        return Some(info);
    }

    let ws = count_indent(&line[after_marker..]);
    if ws == 0 {
        return None;
    }
    Some(ParsedLineInfo {
        kind: LineKind::ListItem,
        indent_level: indent,
        content_start_column: after_marker + ws + 1,
        checkbox: None,
    })
}

/// Try the checkbox form starting right after the list marker
fn classify_task(line: &str, indent: usize, after_marker: usize) -> Option<ParsedLineInfo> {
    let open = after_marker + count_indent(&line[after_marker..]);
    let inner = line[open..].strip_prefix('[')?;
    let c = inner.chars().next()?;
    let char_start = open + 1;
    let char_end = char_start + c.len_utf8();
    if !line[char_end..].starts_with(']') {
        return None;
    }

    let after_box = char_end + 1;
    let ws = count_indent(&line[after_box..]);
    if ws == 0 {
        return None;
    }

    Some(ParsedLineInfo {
        kind: LineKind::Task { done: c == 'x' },
        indent_level: indent,
        content_start_column: after_box + ws + 1,
        checkbox: Some(char_start..char_end),
    })
}

/// Length of a bullet (`*`, `-`, `+`) or ordered marker (`12.`, `3)`)
fn marker_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    match bytes.first()? {
        b'*' | b'-' | b'+' => Some(1),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            match bytes.get(digits) {
                Some(b'.') | Some(b')') => Some(digits + 1),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Count leading spaces and tabs
fn count_indent(s: &str) -> usize {
    s.len() - s.trim_start_matches([' ', '\t']).len()
}
