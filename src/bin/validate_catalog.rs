//! Validate the API catalog and report every problem found.
//!
//! Usage:
//!   validate-catalog
//!   validate-catalog --catalog path/to/apis.json
//!
//! Exits 0 when the catalog is clean, 1 on any validation error or when the
//! catalog cannot be read.

use anyhow::Result;
use apipedia::{
    catalog_counts, init_tracing, parse_args, read_catalog_document, resolve_catalog_path,
    validate_catalog,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "validate-catalog")]
#[command(about = "Check docs/data/apis.json for schema and referential errors")]
struct Cli {
    /// Catalog to validate; defaults to docs/data/apis.json under the site root.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli: Cli = parse_args();
    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

/// Returns whether the catalog passed.
fn run(cli: Cli) -> Result<bool> {
    let catalog_path = resolve_catalog_path(cli.catalog);
    let shown = std::path::absolute(&catalog_path).unwrap_or_else(|_| catalog_path.clone());

    println!("=== APIpedia Schema Validation ===");
    println!("Data file: {}", shown.display());

    if !catalog_path.is_file() {
        println!("ERROR: {} not found", catalog_path.display());
        return Ok(false);
    }

    let document = read_catalog_document(&catalog_path)?;
    let report = validate_catalog(&document);

    for warning in &report.warnings {
        println!("  WARNING: {warning}");
    }

    let (api_count, category_count) = catalog_counts(&document);
    println!("APIs: {api_count}, Categories: {category_count}");

    if !report.is_ok() {
        println!();
        println!("ERROR: {} validation error(s):", report.errors.len());
        for error in &report.errors {
            println!("  - {error}");
        }
        return Ok(false);
    }

    println!("OK: all validation checks passed");
    Ok(true)
}
