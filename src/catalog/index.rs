//! Running id sets over a loaded catalog.
//!
//! The merge tool seeds the index from the catalog on disk and keeps it up to
//! date as entries are appended, so duplicates are caught across every
//! fragment processed in one run, not only against the catalog as loaded.

use crate::catalog::identity::{ApiId, CategoryId, value_key};
use crate::catalog::model::Catalog;
use std::collections::BTreeSet;

#[derive(Debug, Default, Clone)]
/// Known API ids and category ids.
pub struct CatalogIndex {
    api_ids: BTreeSet<ApiId>,
    category_ids: BTreeSet<CategoryId>,
}

impl CatalogIndex {
    /// Seed the index from every record that carries an id.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let api_ids = catalog.apis.iter().filter_map(ApiId::of_record).collect();
        let category_ids = catalog
            .categories
            .iter()
            .filter_map(|category| category.get("id"))
            .map(|id| CategoryId(value_key(id)))
            .collect();
        Self {
            api_ids,
            category_ids,
        }
    }

    pub fn contains_api(&self, id: &ApiId) -> bool {
        self.api_ids.contains(id)
    }

    /// Record an API id; returns false when it was already known.
    pub fn register_api(&mut self, id: ApiId) -> bool {
        self.api_ids.insert(id)
    }

    pub fn contains_category(&self, id: &str) -> bool {
        self.category_ids.contains(&CategoryId(id.to_string()))
    }

    pub fn register_category(&mut self, id: CategoryId) -> bool {
        self.category_ids.insert(id)
    }
}
