//! Pull a JSON array of API entries out of loosely formatted text.
//!
//! Fragments are usually hand-edited or generated notes: sometimes a clean
//! JSON file, sometimes markdown with a ```json fence, sometimes prose with an
//! array pasted in the middle. Each shape is handled by its own strategy and
//! the extractor tries them in order; the first one that yields an array wins.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// One way of locating a JSON array inside raw text.
pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;

    /// The extracted array, or `None` when this strategy does not apply.
    fn extract(&self, text: &str) -> Option<Vec<Value>>;
}

/// The whole text is itself a JSON array.
pub struct WholeDocument;

/// The first ```json fenced block whose body is a JSON array.
pub struct FencedJsonBlock;

/// The first `[ { ... } ]` run in the text that parses as an array.
///
/// Candidates are tried shortest first from each opening `[{`, so a nested
/// array closing early (`"sources": [{...}]`) does not hide the outer one.
/// Only truncated candidates are extended; a syntax error in the prefix
/// rules out every longer candidate from the same opening.
pub struct BracketedObjects;

impl ExtractionStrategy for WholeDocument {
    fn name(&self) -> &'static str {
        "document"
    }

    fn extract(&self, text: &str) -> Option<Vec<Value>> {
        parse_array(text)
    }
}

impl ExtractionStrategy for FencedJsonBlock {
    fn name(&self) -> &'static str {
        "fenced-block"
    }

    fn extract(&self, text: &str) -> Option<Vec<Value>> {
        fenced_block_pattern()
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .find_map(|body| parse_array(body.as_str()))
    }
}

impl ExtractionStrategy for BracketedObjects {
    fn name(&self) -> &'static str {
        "bracketed-objects"
    }

    fn extract(&self, text: &str) -> Option<Vec<Value>> {
        array_open_pattern()
            .find_iter(text)
            .find_map(|open| array_starting_at(&text[open.start()..]))
    }
}

fn array_starting_at(text: &str) -> Option<Vec<Value>> {
    for close in array_close_pattern().find_iter(text) {
        match serde_json::from_str::<Value>(&text[..close.end()]) {
            Ok(Value::Array(items)) => return Some(items),
            Ok(_) => return None,
            Err(err) if err.is_eof() => continue,
            Err(_) => return None,
        }
    }
    None
}

fn parse_array(raw: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn fenced_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"```json\s*\n([\s\S]*?)\n```").expect("fenced block pattern compiles")
    })
}

fn array_open_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[\s*\{").expect("array open pattern compiles"))
}

fn array_close_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\}\s*\]").expect("array close pattern compiles"))
}

#[derive(Debug, Clone, PartialEq)]
/// Entries found in a fragment and the strategy that found them.
pub struct Extraction {
    pub entries: Vec<Value>,
    pub strategy: Option<&'static str>,
}

/// Ordered chain of extraction strategies.
pub struct FragmentExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for FragmentExtractor {
    fn default() -> Self {
        Self::new(vec![
            Box::new(WholeDocument),
            Box::new(FencedJsonBlock),
            Box::new(BracketedObjects),
        ])
    }
}

impl FragmentExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Run the chain; text with no recognizable array yields zero entries.
    pub fn extract(&self, text: &str) -> Extraction {
        for strategy in &self.strategies {
            if let Some(entries) = strategy.extract(text) {
                debug!(strategy = strategy.name(), entries = entries.len(), "fragment array located");
                return Extraction {
                    entries,
                    strategy: Some(strategy.name()),
                };
            }
        }
        debug!("no JSON array found in fragment");
        Extraction {
            entries: Vec::new(),
            strategy: None,
        }
    }
}

/// Extract with the default strategy chain.
pub fn extract_entries(text: &str) -> Vec<Value> {
    FragmentExtractor::default().extract(text).entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_array_parses_directly() {
        let found = FragmentExtractor::default().extract(r#"[{"id": "a"}, {"id": "b"}]"#);
        assert_eq!(found.strategy, Some("document"));
        assert_eq!(found.entries.len(), 2);
    }

    #[test]
    fn fenced_block_ignores_surrounding_prose() {
        let text = "Here are the new APIs:\n\n```json\n[{\"id\":\"x\",\"name\":\"X\"}]\n```\n\nThanks!";
        let found = FragmentExtractor::default().extract(text);
        assert_eq!(found.strategy, Some("fenced-block"));
        assert_eq!(found.entries, vec![json!({"id": "x", "name": "X"})]);
    }

    #[test]
    fn fenced_block_skips_non_array_blocks() {
        let text = "```json\n{\"note\": true}\n```\nthen\n```json\n[{\"id\": \"second\"}]\n```\n";
        let found = FragmentExtractor::default().extract(text);
        assert_eq!(found.entries, vec![json!({"id": "second"})]);
    }

    #[test]
    fn bracketed_objects_found_in_prose() {
        let text = "Result: [ {\"id\": \"inline\"} ] -- end";
        let found = FragmentExtractor::default().extract(text);
        assert_eq!(found.strategy, Some("bracketed-objects"));
        assert_eq!(found.entries, vec![json!({"id": "inline"})]);
    }

    #[test]
    fn bracketed_objects_survive_nested_arrays() {
        let text = concat!(
            "Found: [{\"id\": \"freee\", \"popularity\": {\"sources\": ",
            "[{\"url\": \"https://a\"}, {\"url\": \"https://b\"}]}}] done"
        );
        let found = FragmentExtractor::default().extract(text);
        assert_eq!(found.strategy, Some("bracketed-objects"));
        assert_eq!(found.entries.len(), 1);
        assert_eq!(found.entries[0]["popularity"]["sources"][1]["url"], json!("https://b"));
    }

    #[test]
    fn malformed_opening_does_not_block_later_array() {
        let text = "draft: [{id: oops}] }] }] final: [{\"id\": \"ok\"}]";
        let found = FragmentExtractor::default().extract(text);
        assert_eq!(found.strategy, Some("bracketed-objects"));
        assert_eq!(found.entries, vec![json!({"id": "ok"})]);
    }

    #[test]
    fn syntax_error_stops_extending_candidate() {
        assert_eq!(array_starting_at("[{id: oops}] then [{\"id\": 1}]"), None);
        assert_eq!(
            array_starting_at("[{\"s\": [{\"u\": 1}]}] tail }]"),
            Some(vec![json!({"s": [{"u": 1}]})])
        );
    }

    #[test]
    fn object_documents_are_not_arrays() {
        let found = FragmentExtractor::default().extract(r#"{"apis": []}"#);
        assert_eq!(found.strategy, None);
        assert!(found.entries.is_empty());
    }

    #[test]
    fn unparseable_text_yields_nothing() {
        assert!(extract_entries("no json here, just [brackets] and {braces}").is_empty());
        assert!(extract_entries("").is_empty());
    }

    #[test]
    fn custom_chain_respects_order() {
        let extractor = FragmentExtractor::new(vec![Box::new(BracketedObjects)]);
        let found = extractor.extract("```json\n[{\"id\": \"a\"}]\n```");
        assert_eq!(found.strategy, Some("bracketed-objects"));
        assert_eq!(found.entries, vec![json!({"id": "a"})]);
    }
}
