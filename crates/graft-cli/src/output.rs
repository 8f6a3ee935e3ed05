//! Output formatting and reporting
//!
//! Human-readable renderings of store contents and command results, plus
//! the JSON writer shared by every `--format json` path.

use colored::*;
use graft_core::{Diagnostic, Equivalence, GraftError, NodeId, RoundTripReport, Severity, Store};
use serde::Serialize;
use std::path::Path;

/// Print a command error and its causes to stderr
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "error:".red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".dimmed(), cause);
    }
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Version table of a store, oldest first
pub fn print_history(store: &Store) {
    println!(
        "{} {} ({} node(s))",
        "Store".bold(),
        store.file_name().cyan(),
        store.node_count()
    );
    if store.versions().is_empty() {
        println!("  {}", "no versions".dimmed());
        return;
    }

    let width = store
        .versions()
        .iter()
        .map(|version| version.root_node_id.as_str().len())
        .max()
        .unwrap_or(0);
    for (index, version) in store.versions().iter().enumerate() {
        println!(
            "  {:>3}  {}  {:<width$}  {}",
            index.to_string().yellow(),
            version.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            version.root_node_id.as_str(),
            version.label(),
            width = width
        );
    }
}

/// Indented dump of the subtree under `root`
///
/// A node reached again through its own descendants is reported instead of
/// being expanded.
pub fn print_tree(store: &Store, root: &str) -> anyhow::Result<()> {
    let mut stack = vec![(NodeId::new(root), 0usize)];
    let mut path: Vec<NodeId> = Vec::new();

    while let Some((id, depth)) = stack.pop() {
        path.truncate(depth);
        let indent = "  ".repeat(depth);
        if path.contains(&id) {
            println!("{indent}{} {}", id.as_str().dimmed(), "(cycle)".red());
            continue;
        }

        let node = store.lookup(id.as_str())?;
        for comment in node.leading_comments() {
            println!("{indent}{}", comment.delimited().green());
        }

        let mut line = format!("{indent}{} {}", node.kind_name().bold(), node.id().as_str().dimmed());
        if let Some(text) = node.text() {
            line.push_str(&format!(" {:?}", text));
        }
        for (key, value) in node.properties() {
            let value = serde_json::to_string(value)?;
            line.push_str(&format!(" {}={}", key.cyan(), value));
        }
        println!("{line}");

        for comment in node.trailing_comments() {
            println!("{indent}  {}", comment.delimited().green());
        }

        path.push(id);
        for child in node.children().iter().rev() {
            stack.push((child.clone(), depth + 1));
        }
    }
    Ok(())
}

/// Result of comparing two subtrees
pub fn print_equivalence(left: &str, right: &str, result: &Equivalence) {
    match result {
        Equivalence::Equivalent => {
            println!("{} {} and {} are equivalent", "✓".green(), left.bold(), right.bold());
        }
        Equivalence::Diverged {
            left_path,
            right_path,
            reason,
        } => {
            println!("{} {} and {} diverge: {}", "✗".red(), left.bold(), right.bold(), reason);
            println!("  {} {}", "left: ".dimmed(), join_path(left_path));
            println!("  {} {}", "right:".dimmed(), join_path(right_path));
        }
    }
}

/// Result of a render, re-ingest and compare run
pub fn print_round_trip(root: &str, report: &RoundTripReport) {
    print_diagnostics(&report.diagnostics);
    match &report.equivalence {
        Equivalence::Equivalent => {
            println!("{} {} survives a round trip", "✓".green(), root.bold());
        }
        Equivalence::Diverged {
            left_path,
            right_path,
            reason,
        } => {
            println!("{} {} does not survive a round trip: {}", "✗".red(), root.bold(), reason);
            println!("  {} {}", "stored:  ".dimmed(), join_path(left_path));
            println!("  {} {}", "reparsed:".dimmed(), join_path(right_path));
            println!();
            println!("{}", report.rendered);
        }
    }
}

/// Result of the check command
pub fn print_check(store: &Store, root: &str, diagnostics: &[Diagnostic], failure: Option<&GraftError>) {
    println!(
        "{} {}: {} node(s), {} version(s), latest root {}",
        "Checked".bold(),
        store.file_name().cyan(),
        store.node_count(),
        store.versions().len(),
        root
    );
    print_diagnostics(diagnostics);

    match failure {
        None => println!("{} latest version reconstructs cleanly", "✓".green()),
        Some(GraftError::Unsupported { occurrences, .. }) => {
            println!(
                "{} {} unsupported element(s) in the reconstruction",
                "✗".red(),
                occurrences.len()
            );
            for occurrence in occurrences {
                println!("  {} {}", "-".red(), occurrence);
            }
        }
        Some(err) => println!("{} {}", "✗".red(), err),
    }
}

/// Confirmation after a merge was written
pub fn print_merged(store: &Store, index: usize, added: usize, target: &Path) {
    let root = store
        .version(index)
        .map(|version| version.root_node_id.as_str())
        .unwrap_or("-");
    println!(
        "{} {} node(s) as version {} (root {}) into {}",
        "Merged".green().bold(),
        added,
        index,
        root,
        target.display()
    );
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let severity = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };
        println!(
            "{}: {} {}",
            severity,
            diagnostic.message,
            format!("[{} {}]", diagnostic.kind_name, diagnostic.node_id).dimmed()
        );
    }
}

fn join_path(path: &[NodeId]) -> String {
    path.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" > ")
}
