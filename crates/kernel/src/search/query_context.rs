//! URL query-string helpers for search.
//!
//! The front end carries the active filters in the query string
//! (`?topics=…&keywords=…&entities=…`). These helpers turn them into filter
//! tokens for the composer and build the URLs that carry them.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Which classification a filter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryContextKey {
    Topic,
    Keyword,
    Entity,
}

impl QueryContextKey {
    /// Query-string parameter carrying this key.
    pub const fn param(&self) -> &'static str {
        match self {
            QueryContextKey::Topic => "topics",
            QueryContextKey::Keyword => "keywords",
            QueryContextKey::Entity => "entities",
        }
    }
}

/// One active filter parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryContextItem {
    pub key: QueryContextKey,
    pub value: String,
}

/// Active filter parameters, in topic/keyword/entity order.
pub fn query_context(params: &HashMap<String, String>) -> Vec<QueryContextItem> {
    [
        QueryContextKey::Topic,
        QueryContextKey::Keyword,
        QueryContextKey::Entity,
    ]
    .into_iter()
    .filter_map(|key| {
        let value = params.get(key.param())?;
        is_valid_param(Some(value.as_str())).then(|| QueryContextItem {
            key,
            value: value.clone(),
        })
    })
    .collect()
}

/// Filter tokens from context items; values may be comma-separated.
pub fn filters_from_context(items: &[QueryContextItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.value.split(','))
        .map(str::trim)
        .filter(|token| is_valid_param(Some(*token)))
        .map(str::to_string)
        .collect()
}

/// True when the query text carries nothing to search for.
pub fn is_query_empty(q: Option<&str>) -> bool {
    match q {
        None => true,
        Some(q) => q == "undefined" || q.trim().is_empty(),
    }
}

/// True when a parameter value is present and usable.
pub fn is_valid_param(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) => v != "undefined" && !v.trim().is_empty(),
    }
}

/// Build `path?k=v&…` from the valid required parameters.
///
/// Returns `None` when parameters are required but none is present.
pub fn build_query_url(
    path: &str,
    params: &BTreeMap<String, String>,
    required: &[&str],
) -> Option<String> {
    let pairs: Vec<String> = params
        .iter()
        .filter(|(key, value)| {
            is_valid_param(Some(value.as_str())) && required.contains(&key.as_str())
        })
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect();

    if !required.is_empty() && pairs.is_empty() {
        return None;
    }
    Some(format!("{path}?{}", pairs.join("&")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn context_skips_missing_and_undefined() {
        let items = query_context(&params(&[
            ("topics", "rust"),
            ("keywords", "undefined"),
            ("entities", "  "),
            ("q", "ignored"),
        ]));
        assert_eq!(
            items,
            vec![QueryContextItem {
                key: QueryContextKey::Topic,
                value: "rust".to_string()
            }]
        );
    }

    #[test]
    fn filters_split_comma_lists() {
        let items = query_context(&params(&[("topics", "ai, ml"), ("entities", "Mozilla,")]));
        assert_eq!(filters_from_context(&items), vec!["ai", "ml", "Mozilla"]);
    }

    #[test]
    fn empty_queries() {
        assert!(is_query_empty(None));
        assert!(is_query_empty(Some("")));
        assert!(is_query_empty(Some("   ")));
        assert!(is_query_empty(Some("undefined")));
        assert!(!is_query_empty(Some("rust")));
    }

    #[test]
    fn query_url_keeps_only_required_valid_params() {
        let mut p = BTreeMap::new();
        p.insert("topics".to_string(), "rust lang".to_string());
        p.insert("page".to_string(), "2".to_string());
        p.insert("keywords".to_string(), "".to_string());

        let url = build_query_url("/search", &p, &["topics", "keywords"]).unwrap();
        assert_eq!(url, "/search?topics=rust%20lang");

        assert_eq!(build_query_url("/search", &p, &["entities"]), None);
        assert_eq!(build_query_url("/search", &BTreeMap::new(), &[]).as_deref(), Some("/search?"));
    }
}
