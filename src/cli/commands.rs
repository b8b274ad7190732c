use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gw", about = concat!("[x] gtdwiki v", env!("CARGO_PKG_VERSION"), " - checkbox trees for markdown wikis"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of discovering gtdwiki.toml
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the task tree of a document
    Tree(TreeArgs),
    /// Show completion progress for parent items
    Progress(ProgressArgs),
    /// Make parent tasks agree with their subtasks
    Repair(RepairArgs),
    /// Toggle a task, promote a list item, or batch-toggle a line range
    Toggle(ToggleArgs),
}

#[derive(Args)]
pub struct TreeArgs {
    /// Markdown file
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ProgressArgs {
    /// Markdown file
    pub file: PathBuf,
    /// Include leaf items
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct RepairArgs {
    /// Markdown file
    pub file: PathBuf,
    /// Write the fixes back to the file
    #[arg(long)]
    pub write: bool,
    /// Exit with an error if anything needs fixing
    #[arg(long, conflicts_with = "write")]
    pub check: bool,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Markdown file
    pub file: PathBuf,
    /// Line to toggle (1-based)
    pub line: usize,
    /// Last line of a visual range (inclusive)
    pub end_line: Option<usize>,
    /// Write the result back to the file
    #[arg(long)]
    pub write: bool,
    /// Also promote plain-list ancestors of a promoted item
    #[arg(long)]
    pub promote_ancestors: bool,
    /// Skip the repair pass after toggling
    #[arg(long)]
    pub no_repair: bool,
}
