//! Catalog wiring.
//!
//! This module wraps the JSON catalog under `docs/data/apis.json`: the typed
//! identifiers and closed vocabularies used by its records, the document
//! model the merge tool rewrites, the running id index, and the built-in
//! category table.

pub mod identity;
pub mod index;
pub mod known;
pub mod model;

pub use identity::{
    ApiId, Auth, CategoryId, CategoryRecord, ClosedSet, Difficulty, Pricing, Region, is_truthy,
    value_key,
};
pub use index::CatalogIndex;
pub use known::{KNOWN_CATEGORIES, KnownCategory, known_category};
pub use model::{Catalog, read_catalog_document};

/// Catalog location relative to the site root.
pub const DEFAULT_CATALOG_PATH: &str = "docs/data/apis.json";
