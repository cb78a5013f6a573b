//! Search query builder for Google Docs.

use nexlog_sdk::query::UnbodyQuery;
use nexlog_sdk::types::ContentType;

use crate::error::ConfigurationError;
use crate::plugin::SearchQueryBuilder;
use crate::search::{SearchRequest, compose_query};

/// Fields selected for Google Docs unless the caller overrides them.
pub const FIELDS: [&str; 12] = [
    "title",
    "subtitle",
    "summary",
    "slug",
    "pathString",
    "tags",
    "autoSummary",
    "autoKeywords",
    "autoTopics",
    "autoEntities",
    "createdAt",
    "modifiedAt",
];

#[derive(Debug, Clone, Default)]
pub struct GoogleDocSearcher;

impl SearchQueryBuilder for GoogleDocSearcher {
    fn build(&self, request: &SearchRequest<'_>) -> Result<UnbodyQuery, ConfigurationError> {
        compose_query(ContentType::GoogleDoc, &FIELDS, request)
    }
}
