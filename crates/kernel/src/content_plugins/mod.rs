//! Built-in content plugins.
//!
//! Turns the public plugin configs from the site data into descriptors:
//! Google Docs gets its own search and prompt builders, every other content
//! type gets the generic prompt builder and the default composition.
//! Declared components become manifest loaders relative to `base_dir`.

pub mod gdocs;
mod prompt;

use std::path::Path;
use std::sync::Arc;

use nexlog_sdk::types::ContentType;
use tracing::{debug, info};

pub use prompt::{GenericPromptBuilder, assemble_prompt};

use crate::plugin::{ManifestComponentLoader, PluginDescriptor};
use crate::site::{PluginPublicConfig, SiteData};

/// Descriptor for one public config, without component loaders.
pub fn descriptor_for(public_config: PluginPublicConfig) -> PluginDescriptor {
    let content_type = public_config.content_type;
    match content_type {
        ContentType::GoogleDoc => gdocs::descriptor(public_config),
        ContentType::TextDocument => {
            PluginDescriptor::new(public_config).with_prompt_builder(Arc::new(GenericPromptBuilder))
        }
    }
}

/// Build descriptors for every enabled plugin in the site data.
pub fn build_plugins(site_data: &SiteData, base_dir: &Path) -> Vec<Arc<PluginDescriptor>> {
    let plugins: Vec<Arc<PluginDescriptor>> = site_data
        .enabled_plugins()
        .map(|public_config| {
            let mut plugin = descriptor_for(public_config.clone());
            let components = plugin.public_config().components.clone();
            for (slot, manifest) in components {
                let loader = ManifestComponentLoader::new(base_dir.join(manifest));
                debug!(
                    content_type = %plugin.content_type(),
                    slot = %slot,
                    manifest = %loader.path().display(),
                    "declared plugin component"
                );
                plugin = plugin.with_component(slot, Arc::new(loader));
            }
            Arc::new(plugin)
        })
        .collect();

    info!(count = plugins.len(), "content plugins built");
    plugins
}
