//! Google Docs content plugin.

mod prompt;
mod searcher;

use std::sync::Arc;

pub use prompt::GoogleDocPromptBuilder;
pub use searcher::{FIELDS, GoogleDocSearcher};

use crate::plugin::PluginDescriptor;
use crate::site::PluginPublicConfig;

/// Descriptor with the Google Docs search and prompt builders.
///
/// Component loaders are attached by the caller from the public config.
pub fn descriptor(public_config: PluginPublicConfig) -> PluginDescriptor {
    PluginDescriptor::new(public_config)
        .with_search_builder(Arc::new(GoogleDocSearcher))
        .with_prompt_builder(Arc::new(GoogleDocPromptBuilder))
}
