//! Merge new API entries into the catalog.
//!
//! Each fragment may be a JSON array file or markdown/prose containing one
//! (typically inside a ```json fence). Entries whose id already exists are
//! skipped, built-in categories are registered on first use, and the catalog
//! is rewritten with refreshed metadata counts.
//!
//! Usage:
//!   merge-apis new_apis.json notes.md [--catalog path/to/apis.json]

use anyhow::Result;
use apipedia::{MergeSummary, init_tracing, merge_files, parse_args, resolve_catalog_path};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "merge-apis")]
#[command(about = "Merge API entries from JSON or markdown fragments into docs/data/apis.json")]
struct Cli {
    /// Fragment files holding a JSON array of API entries.
    #[arg(required = true, value_name = "FRAGMENT")]
    fragments: Vec<PathBuf>,
    /// Catalog to update; defaults to docs/data/apis.json under the site root.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli: Cli = parse_args();
    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog_path = resolve_catalog_path(cli.catalog);
    let summary = merge_files(&catalog_path, &cli.fragments)?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &MergeSummary) {
    for fragment in &summary.fragments {
        println!("  {}: {} APIs found", fragment.label, fragment.found);
        for category in &fragment.new_categories {
            println!("    + New category: {category}");
        }
        for category in &fragment.unknown_categories {
            println!("    ! Unknown category: {category}");
        }
    }

    println!();
    println!(
        "Result: +{} APIs added, {} skipped (duplicates)",
        summary.added, summary.skipped
    );
    println!("New categories: {}", summary.new_categories);
    println!(
        "Total: {} APIs, {} categories",
        summary.total_apis, summary.total_categories
    );
}
