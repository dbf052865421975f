//! List artifacts command implementation.

use anyhow::Result;
use serde::Serialize;
use stylekit::{BuildContext, CatalogEntry, EntryFiles};

use crate::OutputFormat;

#[derive(Debug, Serialize)]
struct Row<'a> {
    id: &'a str,
    dir: String,
    files: usize,
    enabled: bool,
    children: Vec<&'a str>,
}

fn row(entry: &CatalogEntry) -> Row<'_> {
    let files = match entry.files() {
        EntryFiles::Flat(files) => files.len(),
        EntryFiles::Namespace { children, shared } => {
            children.iter().map(|c| c.files.len()).sum::<usize>() + shared.len()
        }
    };
    Row {
        id: entry.id().as_str(),
        dir: entry.dir().join("/"),
        files,
        enabled: entry.is_enabled(),
        children: entry.child_ids().into_iter().map(|id| id.as_str()).collect(),
    }
}

/// Runs the list-artifacts command.
pub fn run(ctx: &BuildContext, format: OutputFormat) -> Result<()> {
    let rows: Vec<_> = ctx
        .generator()
        .catalog()
        .entries()
        .iter()
        .map(row)
        .collect();

    if let OutputFormat::Json = format {
        return super::output::print_json(&rows);
    }

    println!("{:<22} {:<10} {:>5}  Status", "Id", "Dir", "Files");
    println!("{}", "-".repeat(60));
    for row in &rows {
        let status = if row.enabled { "" } else { "disabled" };
        let dir = if row.dir.is_empty() { "." } else { &row.dir };
        println!("{:<22} {:<10} {:>5}  {status}", row.id, dir, row.files);
        if !row.children.is_empty() {
            println!("  children: {}", row.children.join(", "));
        }
    }

    println!("\nSelect artifacts with --ids, e.g.:");
    println!("  stylekit codegen --ids css-fn,recipes");
    println!("  stylekit codegen --ids patterns,patterns.box");

    Ok(())
}
