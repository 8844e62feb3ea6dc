//! Shared library for the APIpedia catalog tooling.
//!
//! The crate exposes the catalog types and the two maintenance passes used by
//! the helper binaries: `validate-catalog` checks `docs/data/apis.json` for
//! structural and referential problems, and `merge-apis` appends new API
//! entries extracted from JSON or markdown fragments. Both passes load the
//! whole document, work on it in memory and exit; nothing here is long-lived.

pub mod catalog;
pub mod extract;
pub mod merge;
pub mod runtime;
pub mod validation;

pub use catalog::{
    ApiId, Auth, Catalog, CatalogIndex, CategoryId, CategoryRecord, ClosedSet,
    DEFAULT_CATALOG_PATH, Difficulty, KNOWN_CATEGORIES, Pricing, Region, known_category,
    read_catalog_document,
};
pub use extract::{
    BracketedObjects, ExtractionStrategy, FencedJsonBlock, FragmentExtractor, WholeDocument,
    extract_entries,
};
pub use merge::{
    Fragment, FragmentReport, MERGED_CATALOG_VERSION, MergeSummary, Merger, merge_files,
    merge_fragments,
};
pub use runtime::{
    default_catalog_path, find_site_root, init_tracing, parse_args, resolve_catalog_path,
};
pub use validation::{ValidationReport, catalog_counts, validate, validate_catalog};
