//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nexlog_sdk::types::ContentType;
use thiserror::Error;

/// A static setup defect: missing or invalid configuration.
///
/// Never retried. The caller must not proceed with the operation.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no prompt config found for content type '{content_type}'")]
    MissingPromptConfig { content_type: ContentType },

    #[error("no content plugin configured for content type '{content_type}'")]
    MissingPlugin { content_type: ContentType },

    #[error("no default components registered for content type '{content_type}'")]
    MissingDefaults { content_type: ContentType },

    #[error("failed to read site data from {path}: {source}")]
    UnreadableSiteData {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid site data: {0}")]
    InvalidSiteData(#[from] serde_json::Error),
}

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("search is not available: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Configuration errors are surfaced so the user sees why search failed
        let body = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                "internal server error".to_string()
            }
            AppError::Configuration(e) => {
                tracing::error!(error = %e, "configuration error");
                self.to_string()
            }
            _ => self.to_string(),
        };

        (status, body).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
