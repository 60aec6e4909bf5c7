//! Run state: the result store and the output document.
//!
//! Both are insertion-ordered maps keyed by fixture name, owned by the
//! orchestrator and threaded by reference into each step.

use serde_json::{json, Map, Value};

/// Response bodies of the fixtures run so far.
///
/// This is the only state placeholders can reference. Entries are added as
/// fixtures complete and are never rewritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    values: Map<String, Value>,
}

impl ResultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fixture's result.
    ///
    /// Returns `false` and leaves the store untouched if the name is already
    /// present.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> bool {
        let name = name.into();
        if self.values.contains_key(&name) {
            return false;
        }
        self.values.insert(name, value);
        true
    }

    /// Look up a fixture's result.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Check whether a fixture has a stored result.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored fixture names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// The document written out at the end of a run.
///
/// Holds response bodies of non-silent successful requests and error
/// records for failed ones. Assertions never appear here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputDocument {
    entries: Map<String, Value>,
}

impl OutputDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful response body.
    pub fn record_body(&mut self, name: impl Into<String>, body: Value) {
        self.entries.insert(name.into(), body);
    }

    /// Record a failed request as `{"error": <status>, "text": <body>}`.
    pub fn record_error(&mut self, name: impl Into<String>, status: u16, text: impl Into<String>) {
        self.entries.insert(
            name.into(),
            json!({
                "error": status,
                "text": text.into(),
            }),
        );
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the document into a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_pretty_string(&self) -> String {
        // Serializing a Map of Values cannot fail.
        serde_json::to_string_pretty(&self.entries).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_empty() {
        let store = ResultStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn store_is_append_only() {
        let mut store = ResultStore::new();
        assert!(store.insert("a", json!({"id": "1"})));
        assert!(!store.insert("a", json!({"id": "2"})));
        assert_eq!(store.get("a"), Some(&json!({"id": "1"})));
    }

    #[test]
    fn store_keeps_execution_order() {
        let mut store = ResultStore::new();
        store.insert("zeta", json!(1));
        store.insert("alpha", json!(2));
        store.insert("mid", json!(3));
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn output_records_error_shape() {
        let mut output = OutputDocument::new();
        output.record_error("missing", 404, "not found");
        assert_eq!(
            output.get("missing"),
            Some(&json!({"error": 404, "text": "not found"}))
        );
    }

    #[test]
    fn output_pretty_prints_in_order() {
        let mut output = OutputDocument::new();
        output.record_body("b", json!({"x": 1}));
        output.record_body("a", json!([]));
        let text = output.to_pretty_string();
        assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());
        assert!(text.contains("\n  \"b\": {\n    \"x\": 1\n  }"));
    }

    #[test]
    fn empty_output_is_empty_object() {
        assert_eq!(OutputDocument::new().to_pretty_string(), "{}");
        assert_eq!(OutputDocument::new().into_value(), json!({}));
    }
}
