//! Component loading failures.
//!
//! Every failure names the content type and slot so a broken plugin can be
//! found from a single log line. Failures never reach the end user: the slot
//! keeps its default component.

use std::time::Duration;

use nexlog_sdk::types::{ComponentSlot, ContentType};
use thiserror::Error;

/// A plugin component loader did not produce a result.
#[derive(Debug, Error)]
pub enum ComponentLoadFailure {
    /// The loader returned an error.
    #[error("plugin '{content_type}': component '{slot}' failed to load: {source}")]
    Loader {
        content_type: ContentType,
        slot: ComponentSlot,
        #[source]
        source: anyhow::Error,
    },

    /// The loader panicked.
    #[error("plugin '{content_type}': component '{slot}' loader panicked: {message}")]
    Panicked {
        content_type: ContentType,
        slot: ComponentSlot,
        message: String,
    },

    /// The loader did not finish in time.
    #[error("plugin '{content_type}': component '{slot}' did not load within {after:?}")]
    TimedOut {
        content_type: ContentType,
        slot: ComponentSlot,
        after: Duration,
    },
}

impl ComponentLoadFailure {
    /// Create a loader error.
    pub fn loader(content_type: ContentType, slot: ComponentSlot, source: anyhow::Error) -> Self {
        Self::Loader {
            content_type,
            slot,
            source,
        }
    }

    /// Create a panic failure.
    pub fn panicked(
        content_type: ContentType,
        slot: ComponentSlot,
        message: impl Into<String>,
    ) -> Self {
        Self::Panicked {
            content_type,
            slot,
            message: message.into(),
        }
    }

    /// Create a timeout failure.
    pub fn timed_out(content_type: ContentType, slot: ComponentSlot, after: Duration) -> Self {
        Self::TimedOut {
            content_type,
            slot,
            after,
        }
    }
}
