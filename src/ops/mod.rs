pub mod edit;
pub mod pipeline;
pub mod progress;
pub mod repair;
pub mod toggle;

pub use edit::{FutureLines, Replacements, apply_replacements, promote_line, set_checkbox};
pub use pipeline::{Outcome, repair_document, toggle_and_repair};
pub use progress::{ChildTaskStats, ProgressResult, child_task_stats, compute_progress, progress_by_line};
pub use repair::repair;
pub use toggle::{LineState, RangeAction, Selection, ToggleError, ToggleOptions, toggle, toggle_with};
