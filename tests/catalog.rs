// Library-level checks that go through the filesystem: merging fragment files
// into a catalog on disk and validating the rewritten document.
mod support;

use anyhow::Result;
use apipedia::{Catalog, merge_files, read_catalog_document, validate, validate_catalog};
use serde_json::json;
use support::{Site, api_entry, fixture_catalog};

#[test]
fn fixture_catalog_is_valid() {
    let report = validate_catalog(&fixture_catalog());
    assert!(report.is_ok(), "{:?}", report.errors);
    assert!(report.warnings.is_empty());
}

#[test]
fn merge_files_preserves_unknown_keys() -> Result<()> {
    let mut catalog = fixture_catalog();
    catalog["changelog"] = json!(["2026-10-01: initial import"]);
    catalog["apis"][0]["affiliate"] = json!({"enabled": true, "url": "https://ref.example"});
    let site = Site::new(&catalog)?;
    let fragment = site.write_fragment(
        "batch.json",
        &json!([api_entry("line-messaging", "communication")]).to_string(),
    )?;

    let summary = merge_files(&site.catalog_path(), &[fragment])?;
    assert_eq!(summary.added, 1);
    assert_eq!(summary.new_categories, 1);

    let written = read_catalog_document(&site.catalog_path())?;
    assert_eq!(written["changelog"], json!(["2026-10-01: initial import"]));
    assert_eq!(written["apis"][0]["affiliate"]["enabled"], json!(true));
    assert_eq!(written["categories"][2]["id"], json!("communication"));
    assert!(validate(&written).is_empty());
    Ok(())
}

#[test]
fn merge_files_rejects_malformed_catalog() -> Result<()> {
    let site = Site::new(&json!({"metadata": {}, "apis": []}))?;
    let fragment = site.write_fragment("batch.json", "[]")?;
    let err = merge_files(&site.catalog_path(), &[fragment]).expect_err("categories missing");
    assert!(format!("{err:#}").contains("apis.json"));
    Ok(())
}

#[test]
fn prose_fragment_with_bracketed_array_merges() -> Result<()> {
    let site = Site::new(&fixture_catalog())?;
    let prose = format!(
        "Here is what I found: {} and nothing else.",
        json!([api_entry("freee", "payment")])
    );
    let fragment = site.write_fragment("notes.txt", &prose)?;
    let summary = merge_files(&site.catalog_path(), &[fragment])?;
    assert_eq!(summary.added, 1);
    assert_eq!(summary.fragments[0].strategy, Some("bracketed-objects"));

    let catalog = Catalog::load(&site.catalog_path())?;
    assert_eq!(catalog.apis.len(), 3);
    assert_eq!(catalog.metadata["totalApis"], json!(3));
    Ok(())
}
