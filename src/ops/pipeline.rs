use crate::ops::edit::{Replacements, apply_replacements};
use crate::ops::repair::repair;
use crate::ops::toggle::{Selection, ToggleError, ToggleOptions, toggle_with};
use crate::parse::build_tree;

/// Result of running an operation through to a stable document
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The document after every edit
    pub lines: Vec<String>,
    /// Net changes relative to the input, ready to hand to an editor
    pub changes: Replacements,
    /// Repair passes that produced edits
    pub repair_passes: usize,
}

/// Build, repair and apply until the document is consistent.
pub fn repair_document<S: AsRef<str>>(lines: &[S]) -> Outcome {
    let original: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
    stabilize(original.clone(), &original)
}

/// Toggle, apply, then (optionally) repair until stable.
///
/// A validation failure returns before anything is applied.
pub fn toggle_and_repair<S: AsRef<str>>(
    lines: &[S],
    selection: Selection,
    options: ToggleOptions,
    auto_repair: bool,
) -> Result<Outcome, ToggleError> {
    let original: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
    let staged = toggle_with(&build_tree(&original), selection, options)?;
    let toggled = apply_replacements(&original, &staged);

    if !auto_repair {
        return Ok(Outcome {
            changes: diff_lines(&original, &toggled),
            lines: toggled,
            repair_passes: 0,
        });
    }
    Ok(stabilize(toggled, &original))
}

fn stabilize(mut current: Vec<String>, original: &[String]) -> Outcome {
    let mut passes = 0;
    // One pass reaches a fixed point; the bound only guards against looping
    let max_passes = current.len() + 1;
    while passes < max_passes {
        let fixes = repair(&build_tree(&current));
        if fixes.is_empty() {
            break;
        }
        current = apply_replacements(&current, &fixes);
        passes += 1;
    }
    if passes > 1 {
        log::warn!("repair needed {} passes to settle", passes);
    }

    Outcome {
        changes: diff_lines(original, &current),
        lines: current,
        repair_passes: passes,
    }
}

/// Lines that differ between two equal-length documents
fn diff_lines(before: &[String], after: &[String]) -> Replacements {
    before
        .iter()
        .zip(after)
        .enumerate()
        .filter(|(_, (b, a))| b != a)
        .map(|(idx, (_, a))| (idx + 1, a.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(s: &str) -> Vec<String> {
        s.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_toggle_child_then_repair_parent() {
        let input = lines("- [ ] Parent\n\x20\x20- [x] Child A\n\x20\x20- [ ] Child B");
        let out = toggle_and_repair(&input, Selection::Line(3), ToggleOptions::default(), true).unwrap();
        assert_eq!(out.lines, vec!["- [x] Parent", "  - [x] Child A", "  - [x] Child B"]);
        assert_eq!(out.changes.len(), 2);
        assert_eq!(out.repair_passes, 1);
    }

    #[test]
    fn test_toggle_without_repair_leaves_parent() {
        let input = lines("- [ ] Parent\n\x20\x20- [ ] Only child");
        let out = toggle_and_repair(&input, Selection::Line(2), ToggleOptions::default(), false).unwrap();
        assert_eq!(out.lines, vec!["- [ ] Parent", "  - [x] Only child"]);
        assert_eq!(out.changes.keys().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_toggle_reaching_outside_subtree() {
        // Unchecking a grandchild reopens both ancestors
        let input = lines(
            "- [x] g\n\
             \x20\x20- [x] p\n\
             \x20\x20\x20\x20- [x] c\n\
             \x20\x20- [x] sibling",
        );
        let out = toggle_and_repair(&input, Selection::Line(3), ToggleOptions::default(), true).unwrap();
        assert_eq!(out.lines, vec!["- [ ] g", "  - [ ] p", "    - [ ] c", "  - [x] sibling"]);
    }

    #[test]
    fn test_validation_error_stages_nothing() {
        let input = lines("- [ ] a\n- [x] b");
        let err = toggle_and_repair(&input, Selection::Range { start: 1, end: 2 }, ToggleOptions::default(), true);
        assert_eq!(err, Err(ToggleError::MixedStates));
    }

    #[test]
    fn test_repair_document() {
        let out = repair_document(&["- [ ] p", "  - [x] a"]);
        assert_eq!(out.lines, vec!["- [x] p", "  - [x] a"]);
        assert_eq!(out.changes[&1], "- [x] p");

        let clean = repair_document(&out.lines);
        assert!(clean.changes.is_empty());
        assert_eq!(clean.repair_passes, 0);
    }
}
