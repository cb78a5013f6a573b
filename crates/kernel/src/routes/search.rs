//! Search route handlers.
//!
//! Composes the Unbody query for a parsed user input. Active filters come
//! from the query string (`?topics=…&keywords=…&entities=…`) and the body;
//! executing the query is left to the caller.

use std::collections::{BTreeMap, HashMap};

use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use nexlog_sdk::query::UnbodyQuery;
use nexlog_sdk::types::{ContentType, StructuredUserInput};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::search::query_context::{
    QueryContextKey, build_query_url, filters_from_context, query_context,
};
use crate::search::{SearchParams, compose_search};
use crate::state::AppState;

/// Query-string parameters that carry filters.
const FILTER_PARAMS: [&str; 3] = [
    QueryContextKey::Topic.param(),
    QueryContextKey::Keyword.param(),
    QueryContextKey::Entity.param(),
];

/// Create the search router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/search", post(search_json))
}

/// Search request body.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    /// Collection to search (default: GoogleDoc).
    #[serde(default)]
    pub content_type: Option<ContentType>,
    pub input: StructuredUserInput,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default)]
    pub force_generate: bool,
}

/// JSON search response.
#[derive(Debug, Serialize)]
pub struct SearchJsonResponse {
    pub content_type: ContentType,
    pub filters: Vec<String>,
    /// Search page URL carrying the query-string filters, if any.
    pub url: Option<String>,
    pub query: UnbodyQuery,
    pub graphql: String,
}

async fn search_json(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<SearchBody>,
) -> AppResult<Json<SearchJsonResponse>> {
    let content_type = body.content_type.unwrap_or(ContentType::GoogleDoc);

    let context = query_context(&params);
    let context_params: BTreeMap<String, String> = context
        .iter()
        .map(|item| (item.key.param().to_string(), item.value.clone()))
        .collect();
    let url = build_query_url("/search", &context_params, &FILTER_PARAMS);

    // Query-string filters first, then body filters not already present
    let mut filters = filters_from_context(&context);
    for filter in body.filters {
        if !filters.contains(&filter) {
            filters.push(filter);
        }
    }

    let search = SearchParams {
        input: body.input,
        filters,
        fields: body.fields,
        force_generate: body.force_generate,
    };

    let query = compose_search(state.site(), content_type, &search)?;
    let graphql = query.to_graphql();

    Ok(Json(SearchJsonResponse {
        content_type,
        filters: search.filters,
        url,
        query,
        graphql,
    }))
}
