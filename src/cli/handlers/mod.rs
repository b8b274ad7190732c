use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::document_io::{self, Document};
use crate::model::config::WikiConfig;
use crate::ops::{Outcome, ProgressResult, Selection, ToggleOptions, progress_by_line, repair_document, toggle_and_repair};
use crate::parse::build_tree;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let config_path = cli.config;

    match cli.command {
        Commands::Tree(args) => cmd_tree(args, json),
        Commands::Progress(args) => {
            let config = config_io::resolve_config(config_path.as_deref(), &args.file)?;
            cmd_progress(args, &config, json)
        }
        Commands::Repair(args) => cmd_repair(args, json),
        Commands::Toggle(args) => {
            let config = config_io::resolve_config(config_path.as_deref(), &args.file)?;
            cmd_toggle(args, &config, json)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an outcome's changes and optionally write them back
fn finish(doc: Document, outcome: Outcome, write: bool, json: bool) -> CmdResult {
    let written = write && !outcome.changes.is_empty();
    if written {
        let updated = Document {
            lines: outcome.lines,
            ..doc
        };
        document_io::write_document(&updated)?;
    }

    if json {
        return print_json(&ChangesJson {
            changes: changes_to_json(&outcome.changes),
            repair_passes: outcome.repair_passes,
            written,
        });
    }
    for line in format_changes(&outcome.changes) {
        println!("{}", line);
    }
    if written {
        println!("updated {} line(s)", outcome.changes.len());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_tree(args: TreeArgs, json: bool) -> CmdResult {
    let doc = document_io::read_document(&args.file)?;
    let tree = build_tree(&doc.lines);
    if json {
        return print_json(&tree_to_json(&tree));
    }
    for line in format_tree(&tree) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_progress(args: ProgressArgs, config: &WikiConfig, json: bool) -> CmdResult {
    let doc = document_io::read_document(&args.file)?;
    let tree = build_tree(&doc.lines);
    let show_all = args.all || config.progress.show_all;

    let entries: Vec<(usize, ProgressResult, &str)> = progress_by_line(&tree)
        .into_iter()
        .filter(|(_, p)| show_all || p.has_children)
        .filter_map(|(lnum, p)| tree.get(lnum).map(|node| (lnum, p, node.content())))
        .collect();

    if json {
        let out: Vec<ProgressJson> = entries
            .iter()
            .map(|&(line, p, content)| ProgressJson {
                line,
                fraction: p.fraction,
                has_children: p.has_children,
                content: content.to_string(),
            })
            .collect();
        return print_json(&out);
    }
    for (lnum, progress, content) in &entries {
        println!("{}", format_progress_line(*lnum, content, progress, &config.progress));
    }
    Ok(())
}

fn cmd_repair(args: RepairArgs, json: bool) -> CmdResult {
    let doc = document_io::read_document(&args.file)?;
    let outcome = repair_document(&doc.lines);
    let pending = outcome.changes.len();
    finish(doc, outcome, args.write, json)?;

    if args.check && pending > 0 {
        return Err(format!("{} line(s) need repair", pending).into());
    }
    Ok(())
}

fn cmd_toggle(args: ToggleArgs, config: &WikiConfig, json: bool) -> CmdResult {
    let doc = document_io::read_document(&args.file)?;
    let selection = match args.end_line {
        Some(end) => Selection::Range {
            start: args.line,
            end,
        },
        None => Selection::Line(args.line),
    };
    let options = ToggleOptions {
        promote_ancestors: args.promote_ancestors || config.gtd.promote_ancestors,
    };
    let auto_repair = config.gtd.auto_repair && !args.no_repair;

    let outcome = toggle_and_repair(&doc.lines, selection, options, auto_repair)?;
    finish(doc, outcome, args.write, json)
}
