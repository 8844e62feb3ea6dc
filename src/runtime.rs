//! Runtime helpers shared across binaries.
//!
//! Site-root discovery and catalog path resolution shared by both tools, plus
//! the common argument parsing and tracing setup.

use crate::catalog::DEFAULT_CATALOG_PATH;
use anyhow::{Result, bail};
use clap::Parser;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable naming the site root explicitly.
pub const ENV_SITE_ROOT: &str = "APIPEDIA_ROOT";

/// Returns true when `candidate` contains the catalog document.
pub fn is_site_root(candidate: &Path) -> bool {
    candidate.join(DEFAULT_CATALOG_PATH).is_file()
}

fn site_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !is_site_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_site_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the site root.
///
/// Search order: `APIPEDIA_ROOT` when it points at a real site, the current
/// directory and its parents, the executable's directory and its parents,
/// then the build-time hint.
pub fn find_site_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ENV_SITE_ROOT) {
        if let Some(root) = site_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("APIPEDIA_ROOT_HINT") {
        if let Some(root) = site_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate a site root containing {DEFAULT_CATALOG_PATH}. Set {ENV_SITE_ROOT} or pass --catalog."
    );
}

/// Catalog document location under a site root.
pub fn default_catalog_path(site_root: &Path) -> PathBuf {
    site_root.join(DEFAULT_CATALOG_PATH)
}

/// Resolve the catalog the tools should operate on.
///
/// An explicit path always wins. Without one, the discovered site root is
/// used; when discovery fails the relative default is returned so callers
/// can report the missing file by name.
pub fn resolve_catalog_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    match find_site_root() {
        Ok(root) => default_catalog_path(&root),
        Err(_) => PathBuf::from(DEFAULT_CATALOG_PATH),
    }
}

/// Parse command-line arguments, exiting with status 1 on usage errors.
///
/// `--help` and `--version` still exit 0.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

/// Install the stderr `fmt` subscriber, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
