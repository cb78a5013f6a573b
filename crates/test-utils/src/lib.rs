//! Nexlog test utilities.
//!
//! Helpers for integration testing: user-input fixtures, site-data
//! fixtures, and assertion utilities for composed queries.

use nexlog_sdk::types::{StructuredUserInput, UserInputType};
use serde_json::Value as JsonValue;

/// Create a test input of the given type with no terms.
pub fn test_input(input_type: UserInputType) -> TestInput {
    TestInput {
        input: StructuredUserInput::new(input_type),
    }
}

/// A plain search for `terms`, with semantic search enabled.
pub fn search_query(terms: &[&str]) -> TestInput {
    test_input(UserInputType::SearchQuery)
        .with_subject(terms)
        .requiring_search()
}

/// A question about `subject`, with semantic search enabled.
pub fn question(text: &str, subject: &[&str]) -> TestInput {
    test_input(UserInputType::Question)
        .with_text(text)
        .with_subject(subject)
        .requiring_search()
}

/// A structured user input builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestInput {
    pub input: StructuredUserInput,
}

impl TestInput {
    /// Set the subject/topic terms.
    pub fn with_subject(mut self, terms: &[&str]) -> Self {
        self.input.subject_topic = terms.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the key concepts.
    pub fn with_concepts(mut self, terms: &[&str]) -> Self {
        self.input.concepts_key_terms = terms.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the original text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.input.input = Some(text.to_string());
        self
    }

    /// Mark as requiring a semantic search.
    pub fn requiring_search(mut self) -> Self {
        self.input.requires_search = true;
        self
    }

    /// Mark as not requiring a semantic search.
    pub fn without_search(mut self) -> Self {
        self.input.requires_search = false;
        self
    }

    pub fn build(self) -> StructuredUserInput {
        self.input
    }

    /// The input as JSON, as the parser would send it.
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(&self.input).unwrap_or(JsonValue::Null)
    }
}

/// Site data builders for testing.
pub mod site_data {
    use serde_json::{Value, json};

    /// A blog with one category and no plugins.
    pub fn blog_site() -> Value {
        json!({
            "configs": {
                "plugins": [],
                "contentConfig": {
                    "exclude": ["drafts"],
                    "postsPath": "/posts"
                }
            },
            "context": {
                "title": "Field Notes",
                "description": "Notes on systems programming",
                "siteType": "blog"
            },
            "categories": [
                {
                    "title": "Rust",
                    "description": "Ownership, lifetimes and async",
                    "keywords": ["rust", "tokio"]
                }
            ]
        })
    }

    /// A blog with the given public plugin configs.
    pub fn blog_site_with_plugins(plugins: Value) -> Value {
        let mut site = blog_site();
        site["configs"]["plugins"] = plugins;
        site
    }

    /// A public plugin config with no components.
    pub fn plugin(content_type: &str) -> Value {
        json!({ "type": content_type })
    }

    /// A public plugin config declaring a manifest per slot.
    pub fn plugin_with_components(content_type: &str, components: &[(&str, &str)]) -> Value {
        let components: serde_json::Map<String, Value> = components
            .iter()
            .map(|(slot, manifest)| (slot.to_string(), json!(manifest)))
            .collect();
        json!({ "type": content_type, "components": components })
    }
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual, expected,
            "JSON mismatch:\nactual: {actual:#}\nexpected: {expected:#}"
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a component view shows `name` with the given loading flag.
    pub fn component_view(view: &Value, name: &str, loading: bool) {
        assert_eq!(
            view["component"]["name"], name,
            "Expected component '{name}', got: {view}"
        );
        assert_eq!(
            view["loading"], loading,
            "Expected loading = {loading}, got: {view}"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_input_builder() {
        let input = test_input(UserInputType::Conversational)
            .with_concepts(&["lifetimes"])
            .with_text("tell me about lifetimes")
            .build();

        assert_eq!(input.input_type, UserInputType::Conversational);
        assert!(input.subject_topic.is_empty());
        assert_eq!(input.search_terms(), ["lifetimes".to_string()]);
        assert!(!input.requires_search);
    }

    #[test]
    fn test_search_query_fixture() {
        let input = search_query(&["rust"]).build();
        assert!(input.is_search_only());
        assert!(input.requires_search);
    }

    #[test]
    fn test_question_json() {
        let json = question("what is pinning?", &["pinning"]).to_json();
        assert_eq!(json["type"], "question");
        assert_eq!(json["input"], "what is pinning?");
    }

    #[test]
    fn test_site_data_fixture() {
        let site = site_data::blog_site_with_plugins(serde_json::json!([
            site_data::plugin_with_components("GoogleDoc", &[("card", "components/card.json")]),
            site_data::plugin("TextDocument"),
        ]));
        assert_eq!(site["configs"]["plugins"].as_array().unwrap().len(), 2);
        assert_eq!(
            site["configs"]["plugins"][0]["components"]["card"],
            "components/card.json"
        );
    }

    #[test]
    fn test_assertions() {
        let json = serde_json::json!({"component": {"name": "DefaultCard"}, "loading": true});
        assert::has_key(&json, "component");
        assert::component_view(&json, "DefaultCard", true);

        assert::contains("hello world", "world");
        assert::not_contains("hello world", "foo");
    }
}
