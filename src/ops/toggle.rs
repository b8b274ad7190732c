use crate::model::tree::{NodeId, TaskTree};
use crate::ops::edit::{FutureLines, Replacements};

/// Error type for toggle operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    #[error("mixed-or-non-list selection: line {lnum} is not a list item")]
    MixedOrNonList { lnum: usize },
    #[error("mixed task states in selection")]
    MixedStates,
    #[error("line {lnum} is outside the document ({line_count} lines)")]
    LineOutOfRange { lnum: usize, line_count: usize },
    #[error("empty range: start line {start} is after end line {end}")]
    EmptyRange { start: usize, end: usize },
}

/// What the user asked to toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The line under the cursor (1-based)
    Line(usize),
    /// An inclusive visual range of lines (1-based)
    Range { start: usize, end: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleOptions {
    /// When promoting a single plain item, also promote every plain-list
    /// ancestor, nearest first
    pub promote_ancestors: bool,
}

/// Pre-toggle state of one selected line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Invalid,
    ListItem,
    Done,
    NotDone,
}

/// What a validated range will do to every selected line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAction {
    /// All lines are plain list items
    Promote,
    /// All lines are tasks in the same state; set them to this one
    SetDone(bool),
}

/// Classify a line for batch validation
pub fn line_state(tree: &TaskTree, lnum: usize) -> LineState {
    match tree.get(lnum) {
        None => LineState::Invalid,
        Some(node) if !node.is_task() => LineState::ListItem,
        Some(node) if node.is_done() => LineState::Done,
        Some(_) => LineState::NotDone,
    }
}

/// Toggle with default options
pub fn toggle(tree: &TaskTree, selection: Selection) -> Result<Replacements, ToggleError> {
    toggle_with(tree, selection, ToggleOptions::default())
}

/// Stage the edits for a toggle.
///
/// - a plain list item is promoted to a task, done only if it already has
///   task children and all of them are done
/// - a task flips, and its new state is written to every task below it
///
/// A range must be uniform (all plain items, all done, or all open) or
/// nothing is staged. The caller applies the result atomically and then
/// runs a repair pass, since ancestors outside the toggled subtree may now
/// be stale.
pub fn toggle_with(
    tree: &TaskTree,
    selection: Selection,
    options: ToggleOptions,
) -> Result<Replacements, ToggleError> {
    let mut view = FutureLines::new(tree);

    match selection {
        Selection::Line(lnum) => {
            check_in_range(tree, lnum)?;
            let Some(id) = tree.id_at(lnum) else {
                return Ok(Replacements::new());
            };
            if view.is_task(id) {
                let done = !view.is_done(id);
                set_with_cascade(&mut view, id, done);
            } else {
                promote(&mut view, id);
                if options.promote_ancestors {
                    promote_ancestors(&mut view, id);
                }
            }
        }
        Selection::Range { start, end } => {
            match validate_range(tree, start, end)? {
                RangeAction::Promote => {
                    // Bottom-up so each parent sees its freshly promoted children
                    for lnum in (start..=end).rev() {
                        if let Some(id) = tree.id_at(lnum) {
                            promote(&mut view, id);
                        }
                    }
                }
                RangeAction::SetDone(done) => {
                    for lnum in start..=end {
                        if let Some(id) = tree.id_at(lnum) {
                            set_with_cascade(&mut view, id, done);
                        }
                    }
                }
            }
        }
    }

    let out = view.into_replacements();
    log::debug!("toggle {:?} staged {} line(s)", selection, out.len());
    Ok(out)
}

/// Check that a visual range is uniform and decide what toggling it does
pub fn validate_range(tree: &TaskTree, start: usize, end: usize) -> Result<RangeAction, ToggleError> {
    if start > end {
        return Err(ToggleError::EmptyRange { start, end });
    }
    check_in_range(tree, start)?;
    check_in_range(tree, end)?;

    let states: Vec<(usize, LineState)> = (start..=end).map(|l| (l, line_state(tree, l))).collect();
    if let Some(&(lnum, _)) = states.iter().find(|(_, s)| *s == LineState::Invalid) {
        return Err(ToggleError::MixedOrNonList { lnum });
    }
    let first = states[0].1;
    if states.iter().any(|(_, s)| *s != first) {
        return Err(ToggleError::MixedStates);
    }
    match first {
        LineState::ListItem => Ok(RangeAction::Promote),
        LineState::Done => Ok(RangeAction::SetDone(false)),
        LineState::NotDone => Ok(RangeAction::SetDone(true)),
        LineState::Invalid => Err(ToggleError::MixedOrNonList { lnum: start }),
    }
}

fn check_in_range(tree: &TaskTree, lnum: usize) -> Result<(), ToggleError> {
    if lnum == 0 || lnum > tree.line_count() {
        return Err(ToggleError::LineOutOfRange {
            lnum,
            line_count: tree.line_count(),
        });
    }
    Ok(())
}

/// Set a task and every task below it to `done`
fn set_with_cascade(view: &mut FutureLines<'_>, id: NodeId, done: bool) {
    view.set_done(id, done);
    for desc in view.tree().descendants(id) {
        if view.is_task(desc) {
            view.set_done(desc, done);
        }
    }
}

fn promote(view: &mut FutureLines<'_>, id: NodeId) {
    let done = view.task_children_all_done(id);
    view.promote(id, done);
}

fn promote_ancestors(view: &mut FutureLines<'_>, id: NodeId) {
    for ancestor in view.tree().ancestors(id) {
        if !view.is_task(ancestor) {
            promote(view, ancestor);
        }
    }
}
