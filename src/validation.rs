//! Structural and referential checks for the catalog document.
//!
//! Validation runs on the raw JSON value rather than typed records so that a
//! half-written entry degrades to "field not validated" instead of aborting
//! the whole run. Every finding is collected; the only early exit is a
//! catalog with no `metadata` at all.

use crate::catalog::{
    ApiId, Auth, ClosedSet, Difficulty, Pricing, Region, is_truthy, value_key,
};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

const REQUIRED_METADATA_FIELDS: &[&str] = &["version", "lastUpdated", "totalApis", "totalCategories"];
const REQUIRED_API_FIELDS: &[&str] = &[
    "id",
    "name",
    "description",
    "url",
    "category",
    "pricing",
    "auth",
    "region",
    "popularity",
];
const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Outcome of validating one catalog document.
///
/// `errors` decide the exit status; `warnings` are advisory only.
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Error messages for a catalog document; empty when it is valid.
pub fn validate(document: &Value) -> Vec<String> {
    validate_catalog(document).errors
}

/// Run every catalog rule and collect errors plus advisory warnings.
pub fn validate_catalog(document: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(metadata) = document
        .get("metadata")
        .and_then(Value::as_object)
        .filter(|meta| !meta.is_empty())
    else {
        report.errors.push("metadata is missing".to_string());
        return report;
    };

    for field in REQUIRED_METADATA_FIELDS {
        if !metadata.contains_key(*field) {
            report.errors.push(format!("metadata.{field} is missing"));
        }
    }

    let categories = array_or_empty(document.get("categories"));
    let apis = array_or_empty(document.get("apis"));
    let category_ids: BTreeSet<String> = categories
        .iter()
        .filter_map(|category| category.get("id"))
        .map(value_key)
        .collect();

    check_count(metadata, "totalApis", apis.len(), &mut report.errors);
    check_count(metadata, "totalCategories", categories.len(), &mut report.errors);

    report.errors.extend(duplicate_id_errors(apis));

    for (index, api) in apis.iter().enumerate() {
        validate_api(index, api, &category_ids, &mut report);
    }

    debug!(
        apis = apis.len(),
        categories = categories.len(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "catalog validated"
    );
    report
}

/// Number of API and category records, treating malformed sections as empty.
pub fn catalog_counts(document: &Value) -> (usize, usize) {
    (
        array_or_empty(document.get("apis")).len(),
        array_or_empty(document.get("categories")).len(),
    )
}

fn array_or_empty(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn check_count(metadata: &Map<String, Value>, field: &str, actual: usize, errors: &mut Vec<String>) {
    let declared = metadata.get(field);
    let matches = declared
        .and_then(Value::as_f64)
        .map(|n| n == actual as f64)
        .unwrap_or(false);
    if !matches {
        let shown = declared.map(value_key).unwrap_or_else(|| "null".to_string());
        errors.push(format!(
            "metadata.{field} ({shown}) does not match actual count ({actual})"
        ));
    }
}

// One error per repeated occurrence: an id seen N times yields N-1 errors.
fn duplicate_id_errors(apis: &[Value]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = BTreeSet::new();
    for api in apis {
        let id = api
            .get("id")
            .map(ApiId::of_value)
            .unwrap_or_else(|| ApiId::new("<unknown>"));
        if seen.contains(&id) {
            errors.push(format!("duplicate id: {id}"));
        }
        seen.insert(id);
    }
    errors
}

fn validate_api(
    index: usize,
    api: &Value,
    category_ids: &BTreeSet<String>,
    report: &mut ValidationReport,
) {
    let label = match api.get("id") {
        Some(id) => format!("apis[{}]", value_key(id)),
        None => format!("apis[<index {index}>]"),
    };
    let errors = &mut report.errors;

    for field in REQUIRED_API_FIELDS {
        if api.get(*field).is_none() {
            errors.push(format!("{label}: required field \"{field}\" is missing"));
        }
    }

    if let Some(category) = api.get("category").filter(|c| is_truthy(c)) {
        if !category_ids.contains(&value_key(category)) {
            errors.push(format!(
                "{label}: category \"{}\" is not defined in categories",
                value_key(category)
            ));
        }
    }

    check_member::<Pricing>(&label, api, false, errors);
    check_member::<Auth>(&label, api, false, errors);
    check_member::<Region>(&label, api, false, errors);
    // Optional, but once the key exists even an empty value must be valid.
    check_member::<Difficulty>(&label, api, true, errors);

    if let Some(popularity) = api
        .get("popularity")
        .filter(|p| is_truthy(p))
        .and_then(Value::as_object)
    {
        validate_popularity(&label, popularity, report);
    }
}

fn check_member<T: ClosedSet>(label: &str, api: &Value, when_present: bool, errors: &mut Vec<String>) {
    let Some(value) = api.get(T::FIELD) else {
        return;
    };
    if !when_present && !is_truthy(value) {
        return;
    }
    if !T::accepts(value) {
        errors.push(format!(
            "{label}: {} \"{}\" is invalid (expected one of: {})",
            T::FIELD,
            value_key(value),
            T::allowed_values()
        ));
    }
}

fn validate_popularity(label: &str, popularity: &Map<String, Value>, report: &mut ValidationReport) {
    if let Some(score) = popularity.get("score").filter(|s| !s.is_null()) {
        let in_range = numeric_score(score)
            .map(|n| SCORE_RANGE.contains(&n))
            .unwrap_or(false);
        if !in_range {
            report.errors.push(format!(
                "{label}: popularity.score ({}) must be a number between 0 and 100",
                value_key(score)
            ));
        }
    }

    let sources = array_or_empty(popularity.get("sources"));
    match sources.len() {
        0 => report.errors.push(format!(
            "{label}: popularity.sources is empty (at least one source URL is required)"
        )),
        1 => report.warnings.push(format!(
            "{label}: popularity.sources has only one entry (two or more recommended)"
        )),
        _ => {}
    }

    for (position, source) in sources.iter().enumerate() {
        let has_url = source.get("url").map(is_truthy).unwrap_or(false);
        if !has_url {
            report
                .errors
                .push(format!("{label}: popularity.sources[{position}] has no url"));
        }
    }
}

// Booleans score as 1 and 0.
fn numeric_score(score: &Value) -> Option<f64> {
    match score {
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        other => other.as_f64(),
    }
}
