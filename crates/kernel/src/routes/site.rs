//! Site data route handlers.
//!
//! The rendering layer polls these to pick up upgraded components: each
//! slot is reported as `{component, loading}`.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use nexlog_sdk::types::{ComponentSlot, ContentType};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::site::{Category, ComponentView, PerContentTypeView, PluginPublicConfig, SiteContext};
use crate::state::AppState;

/// Create the site data router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/site", get(site_json))
        .route("/api/site/components/{content_type}", get(components_json))
}

/// Full site response.
#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub context: SiteContext,
    pub categories: Vec<Category>,
    /// Public configs of the active plugins.
    pub plugins: Vec<PluginPublicConfig>,
    pub components: PerContentTypeView,
}

/// Components of one content type.
#[derive(Debug, Serialize)]
pub struct ComponentsResponse {
    pub content_type: ContentType,
    pub components: BTreeMap<ComponentSlot, ComponentView>,
}

async fn site_json(State(state): State<AppState>) -> Json<SiteResponse> {
    let site = state.site();
    let data = site.site_data();

    Json(SiteResponse {
        context: data.context.clone(),
        categories: data.categories.clone(),
        plugins: site
            .plugins()
            .iter()
            .map(|plugin| plugin.public_config().clone())
            .collect(),
        components: site.per_content_type(),
    })
}

async fn components_json(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
) -> AppResult<Json<ComponentsResponse>> {
    let content_type: ContentType = content_type.parse().map_err(|_| AppError::NotFound)?;
    let components = state
        .site()
        .components_for(content_type)
        .ok_or(AppError::NotFound)?;

    Ok(Json(ComponentsResponse {
        content_type,
        components,
    }))
}
