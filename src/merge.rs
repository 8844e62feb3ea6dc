//! Append new API entries from fragments to the catalog.
//!
//! Merging is deliberately permissive: entries are appended as-is, without
//! checking enumerated fields or popularity blocks. Run the validator after a
//! merge to catch those. The merge only guards against duplicate ids and
//! auto-registers categories from the built-in table.

use crate::catalog::{
    ApiId, Catalog, CatalogIndex, CategoryId, is_truthy, known_category, value_key,
};
use crate::extract::FragmentExtractor;
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// `metadata.version` written after every merge.
pub const MERGED_CATALOG_VERSION: &str = "3.0.0";

#[derive(Debug, Clone)]
/// Raw text of one fragment plus a label for reporting.
pub struct Fragment {
    pub label: String,
    pub text: String,
}

impl Fragment {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Read a fragment file; the label is its file name.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading fragment {}", path.display()))?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { label, text })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// What happened to the entries of a single fragment.
pub struct FragmentReport {
    pub label: String,
    /// Entries in the extracted array, including ones later skipped.
    pub found: usize,
    pub added: usize,
    pub skipped: usize,
    pub new_categories: Vec<CategoryId>,
    /// Category values outside the built-in table, once per entry using them.
    pub unknown_categories: Vec<String>,
    pub strategy: Option<&'static str>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Totals across a merge run.
pub struct MergeSummary {
    pub added: usize,
    pub skipped: usize,
    pub new_categories: usize,
    pub fragments: Vec<FragmentReport>,
    pub total_apis: usize,
    pub total_categories: usize,
}

/// Stateful merge over one catalog.
///
/// The index is shared across fragments, so an id added from the first
/// fragment is a duplicate when it shows up again in a later one.
pub struct Merger<'a> {
    catalog: &'a mut Catalog,
    index: CatalogIndex,
    extractor: FragmentExtractor,
    summary: MergeSummary,
}

impl<'a> Merger<'a> {
    pub fn new(catalog: &'a mut Catalog) -> Self {
        let index = CatalogIndex::from_catalog(catalog);
        Self {
            catalog,
            index,
            extractor: FragmentExtractor::default(),
            summary: MergeSummary::default(),
        }
    }

    /// Extract and merge one fragment.
    pub fn merge_fragment(&mut self, fragment: &Fragment) -> &FragmentReport {
        let extraction = self.extractor.extract(&fragment.text);
        self.merge_entries(&fragment.label, extraction.entries, extraction.strategy)
    }

    /// Merge an already extracted list of entries.
    pub fn merge_entries(
        &mut self,
        label: &str,
        entries: Vec<Value>,
        strategy: Option<&'static str>,
    ) -> &FragmentReport {
        let mut report = FragmentReport {
            label: label.to_string(),
            found: entries.len(),
            strategy,
            ..FragmentReport::default()
        };

        for entry in entries {
            let Some(id) = ApiId::of_record(&entry) else {
                continue;
            };
            if self.index.contains_api(&id) {
                debug!(fragment = label, id = %id, "skipping duplicate id");
                report.skipped += 1;
                continue;
            }

            if let Some(category) = entry.get("category").filter(|c| is_truthy(c)) {
                self.resolve_category(category, &mut report);
            }

            self.catalog.apis.push(entry);
            self.index.register_api(id);
            report.added += 1;
        }

        self.summary.added += report.added;
        self.summary.skipped += report.skipped;
        self.summary.new_categories += report.new_categories.len();
        self.summary.fragments.push(report);
        &self.summary.fragments[self.summary.fragments.len() - 1]
    }

    fn resolve_category(&mut self, category: &Value, report: &mut FragmentReport) {
        let key = value_key(category);
        if self.index.contains_category(&key) {
            return;
        }
        match category.as_str().and_then(known_category) {
            Some(record) => {
                info!(category = %record.id, "registering built-in category");
                self.catalog.categories.push(json!({
                    "id": record.id.as_str(),
                    "name": record.name,
                    "icon": record.icon,
                }));
                self.index.register_category(record.id.clone());
                report.new_categories.push(record.id);
            }
            None => {
                info!(category = %key, "entry references a category outside the built-in table");
                report.unknown_categories.push(key);
            }
        }
    }

    /// Refresh metadata counts, stamp the merged version and return totals.
    pub fn finish(self) -> MergeSummary {
        let Merger {
            catalog,
            mut summary,
            ..
        } = self;
        catalog.refresh_counts();
        catalog.set_version(MERGED_CATALOG_VERSION);
        summary.total_apis = catalog.apis.len();
        summary.total_categories = catalog.categories.len();
        summary
    }
}

/// Merge every fragment into the catalog in order.
pub fn merge_fragments(catalog: &mut Catalog, fragments: &[Fragment]) -> MergeSummary {
    let mut merger = Merger::new(catalog);
    for fragment in fragments {
        merger.merge_fragment(fragment);
    }
    merger.finish()
}

/// Load the catalog, merge fragment files into it and write it back.
///
/// Any unreadable fragment aborts the run before the catalog is rewritten.
pub fn merge_files(catalog_path: &Path, fragment_paths: &[PathBuf]) -> Result<MergeSummary> {
    let mut catalog = Catalog::load(catalog_path)?;
    let fragments = fragment_paths
        .iter()
        .map(|path| Fragment::read(path))
        .collect::<Result<Vec<_>>>()?;
    let summary = merge_fragments(&mut catalog, &fragments);
    catalog.save(catalog_path)?;
    Ok(summary)
}
