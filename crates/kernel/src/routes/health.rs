//! Health check endpoint.
//!
//! Returns 200 OK while the site data session is active,
//! 503 Service Unavailable once it has been closed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    session_id: Uuid,
    session_active: bool,
    /// Slots whose plugin component is still resolving.
    loading: usize,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let site = state.site();
    let session_active = site.is_active();

    let (status, status_code) = if session_active {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            session_id: site.session_id(),
            session_active,
            loading: site.loading_count(),
        }),
    )
}

/// Create the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
