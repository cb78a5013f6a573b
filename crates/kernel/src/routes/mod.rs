//! HTTP route handlers.

pub mod health;
pub mod search;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// All kernel routes, without middleware layers.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(site::router())
        .merge(search::router())
}
