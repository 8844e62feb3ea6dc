use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Stable identifier for an API record.
///
/// Catalog ids are normally strings. Other JSON values are keyed by their
/// compact rendering and kept apart from strings, so `42` and `"42"` are
/// different ids, as they are in the document itself.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ApiId {
    key: String,
    textual: bool,
}

/// Identifier of a category record (e.g. `payment`, `cms`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl ApiId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            key: id.into(),
            textual: true,
        }
    }

    /// Key for any JSON value found under `id`.
    pub fn of_value(id: &Value) -> Self {
        Self {
            key: value_key(id),
            textual: id.is_string(),
        }
    }

    /// Id of an API record, or `None` when the record has no usable id.
    pub fn of_record(record: &Value) -> Option<Self> {
        record
            .get("id")
            .filter(|id| is_truthy(id))
            .map(Self::of_value)
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl CategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category entry as stored under `categories`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
}

/// A field whose values come from a fixed, closed vocabulary.
pub trait ClosedSet: Sized + Copy + 'static {
    /// Field name inside an API record.
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }

    /// Whether a raw JSON value names one of the allowed members.
    fn accepts(value: &Value) -> bool {
        value.as_str().and_then(Self::parse).is_some()
    }

    fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pricing {
    Free,
    Freemium,
    Paid,
}

impl ClosedSet for Pricing {
    const FIELD: &'static str = "pricing";
    const ALL: &'static [Self] = &[Pricing::Free, Pricing::Freemium, Pricing::Paid];

    fn as_str(&self) -> &'static str {
        match self {
            Pricing::Free => "free",
            Pricing::Freemium => "freemium",
            Pricing::Paid => "paid",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Auth {
    ApiKey,
    OAuth2,
    Bearer,
    None,
}

impl ClosedSet for Auth {
    const FIELD: &'static str = "auth";
    const ALL: &'static [Self] = &[Auth::ApiKey, Auth::OAuth2, Auth::Bearer, Auth::None];

    fn as_str(&self) -> &'static str {
        match self {
            Auth::ApiKey => "apiKey",
            Auth::OAuth2 => "oauth2",
            Auth::Bearer => "bearer",
            Auth::None => "none",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Region {
    Japan,
    Global,
    Both,
}

impl ClosedSet for Region {
    const FIELD: &'static str = "region";
    const ALL: &'static [Self] = &[Region::Japan, Region::Global, Region::Both];

    fn as_str(&self) -> &'static str {
        match self {
            Region::Japan => "japan",
            Region::Global => "global",
            Region::Both => "both",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl ClosedSet for Difficulty {
    const FIELD: &'static str = "difficulty";
    const ALL: &'static [Self] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// JSON truthiness as the catalog tooling understands it: null, `false`, zero,
/// and empty strings/arrays/objects count as "not set".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text used when a value appears in a diagnostic or as a lookup key.
///
/// Strings render without quotes; everything else as compact JSON.
pub fn value_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
