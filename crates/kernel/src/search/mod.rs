//! Search query composition.
//!
//! This module provides:
//! - the staged query composer used by content plugins
//! - query-string helpers that turn URL parameters into filters
//! - [`compose_search`], the entry point used by the HTTP API and the CLI

mod composer;
pub mod query_context;

pub use composer::{
    ABOUT_CERTAINTY, DEFAULT_FIELDS, FILTER_FIELDS, GENERATED_FIELDS, PATH_FIELD, SearchRequest,
    build_query, compose_query,
};

use nexlog_sdk::query::UnbodyQuery;
use nexlog_sdk::types::{ContentType, StructuredUserInput};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigurationError;
use crate::site::SiteDataState;

/// Owned search parameters, as received from a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub input: StructuredUserInput,
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    #[serde(default)]
    pub force_generate: bool,
}

impl SearchParams {
    pub fn new(input: StructuredUserInput) -> Self {
        Self {
            input,
            filters: Vec::new(),
            fields: None,
            force_generate: false,
        }
    }
}

/// Compose the query for a content type with the session's plugin.
pub fn compose_search(
    state: &SiteDataState,
    content_type: ContentType,
    params: &SearchParams,
) -> Result<UnbodyQuery, ConfigurationError> {
    let plugin = state
        .plugin_for(content_type)
        .ok_or(ConfigurationError::MissingPlugin { content_type })?;

    let mut request = SearchRequest::new(state.config(), state.site_data(), &params.input)
        .with_filters(&params.filters)
        .with_force_generate(params.force_generate);
    if let Some(ref fields) = params.fields {
        request = request.with_fields(fields);
    }

    let query = build_query(plugin, &request)?;
    debug!(
        content_type = %content_type,
        filters = params.filters.len(),
        about = query.about_search().is_some(),
        generate = query.generation().is_some(),
        "search query composed"
    );
    Ok(query)
}
