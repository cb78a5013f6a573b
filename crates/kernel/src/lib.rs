//! Nexlog Kernel Library
//!
//! Site data state, plugin component loading, and search query composition.
//! The `nexlog` binary serves this over HTTP; integration tests use it
//! directly.

pub mod config;
pub mod content;
pub mod content_plugins;
pub mod error;
pub mod plugin;
pub mod routes;
pub mod search;
pub mod site;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult, ConfigurationError};
pub use state::AppState;
