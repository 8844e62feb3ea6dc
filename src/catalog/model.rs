//! In-memory representation of `docs/data/apis.json`.
//!
//! Records stay as raw JSON values so fields the tooling does not know about
//! (affiliate blocks, popularity details, future additions) survive a
//! load/save round trip untouched. Top-level and record key order is
//! preserved on rewrite.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::warn;

/// Catalog document with the shape the merge tool needs to mutate it.
#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
    pub metadata: Map<String, Value>,
    pub categories: Vec<Value>,
    pub apis: Vec<Value>,
    /// Any other top-level keys, written back verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Top-level keys in document order, replayed by `to_value`.
    #[serde(skip)]
    key_order: Vec<String>,
}

impl Catalog {
    /// Read and shape-check a catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let document = read_catalog_document(path)?;
        Self::from_value(document).with_context(|| format!("loading catalog {}", path.display()))
    }

    /// Interpret an already parsed document.
    ///
    /// Requires a top-level object with `metadata` (object), `categories`
    /// (array) and `apis` (array). Records inside the arrays are not checked.
    pub fn from_value(document: Value) -> Result<Self> {
        let Some(sections) = document.as_object() else {
            bail!("catalog must be a JSON object");
        };
        let key_order = sections.keys().cloned().collect();
        let mut catalog: Catalog = serde_json::from_value(document)
            .context("catalog needs a metadata object plus categories and apis arrays")?;
        catalog.key_order = key_order;
        Ok(catalog)
    }

    /// Recompute `metadata.totalApis` and `metadata.totalCategories`.
    pub fn refresh_counts(&mut self) {
        self.metadata
            .insert("totalApis".to_string(), Value::from(self.apis.len()));
        self.metadata.insert(
            "totalCategories".to_string(),
            Value::from(self.categories.len()),
        );
    }

    pub fn set_version(&mut self, version: &str) {
        self.metadata
            .insert("version".to_string(), Value::from(version));
    }

    /// The full document, keys in the order they were loaded.
    ///
    /// Sections the loaded document did not name (a catalog built in code)
    /// follow in `metadata`, `categories`, `apis`, extras order.
    pub fn to_value(&self) -> Value {
        let mut sections = Map::new();
        sections.insert("metadata".to_string(), Value::Object(self.metadata.clone()));
        sections.insert("categories".to_string(), Value::Array(self.categories.clone()));
        sections.insert("apis".to_string(), Value::Array(self.apis.clone()));
        for (key, value) in &self.extra {
            sections.insert(key.clone(), value.clone());
        }

        let mut document = Map::new();
        for key in &self.key_order {
            if let Some(value) = sections.shift_remove(key) {
                document.insert(key.clone(), value);
            }
        }
        document.extend(sections);
        Value::Object(document)
    }

    /// Write the catalog as pretty-printed UTF-8 JSON.
    ///
    /// The document is staged in a temporary file next to `path` and renamed
    /// over it, so a failed write leaves the previous catalog in place.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut rendered =
            serde_json::to_string_pretty(&self.to_value()).context("serializing catalog")?;
        rendered.push('\n');

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)
            .with_context(|| format!("staging catalog write in {}", dir.display()))?;
        staged
            .write_all(rendered.as_bytes())
            .with_context(|| format!("writing staged catalog for {}", path.display()))?;
        carry_permissions(path, staged.path());
        staged
            .persist(path)
            .map_err(|err| err.error)
            .with_context(|| format!("replacing catalog {}", path.display()))?;
        Ok(())
    }
}

// Keep the served file's permissions instead of the 0600 temp default.
fn carry_permissions(existing: &Path, staged: &Path) {
    let Ok(meta) = fs::metadata(existing) else {
        return;
    };
    if let Err(err) = fs::set_permissions(staged, meta.permissions()) {
        warn!(
            catalog = %existing.display(),
            error = %err,
            "could not copy permissions onto rewritten catalog"
        );
    }
}

/// Read and parse a catalog without any shape checks.
pub fn read_catalog_document(path: &Path) -> Result<Value> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))?;
    let document: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(document)
}
