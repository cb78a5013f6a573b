//! Content plugin descriptors.
//!
//! A descriptor binds a content type to what its plugin can do. Each
//! capability is optional and typed: a plugin without custom components has
//! an empty loader map, a plugin without a search builder returns `None`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use nexlog_sdk::component::ComponentRef;
use nexlog_sdk::query::UnbodyQuery;
use nexlog_sdk::types::{ComponentSlot, ContentType, StructuredUserInput};

use crate::error::ConfigurationError;
use crate::search::SearchRequest;
use crate::site::{PluginPublicConfig, SiteConfig, SiteData};

/// Loads one custom UI component.
///
/// `Ok(None)` is the explicit "no component" signal: the slot keeps its
/// default. Errors are recovered by the loader in the same way.
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    async fn load(&self) -> anyhow::Result<Option<ComponentRef>>;
}

/// Builds the search query for a plugin's content type.
pub trait SearchQueryBuilder: Send + Sync {
    fn build(&self, request: &SearchRequest<'_>) -> Result<UnbodyQuery, ConfigurationError>;
}

/// Builds the generation prompt for a user input.
pub trait PromptBuilder: Send + Sync {
    fn create(
        &self,
        site_config: &SiteConfig,
        site_data: &SiteData,
        input: &StructuredUserInput,
    ) -> String;
}

/// Something a plugin may or may not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    UiComponents,
    SearchBuilder,
    PromptBuilder,
}

/// Configuration bundle of one content plugin.
#[derive(Clone)]
pub struct PluginDescriptor {
    content_type: ContentType,
    public_config: PluginPublicConfig,
    ui_components: BTreeMap<ComponentSlot, Arc<dyn ComponentLoader>>,
    search: Option<Arc<dyn SearchQueryBuilder>>,
    prompt: Option<Arc<dyn PromptBuilder>>,
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("content_type", &self.content_type)
            .field("capabilities", &self.capabilities())
            .field("slots", &self.declared_slots().collect::<Vec<_>>())
            .finish()
    }
}

impl PluginDescriptor {
    /// Descriptor with no capabilities.
    pub fn new(public_config: PluginPublicConfig) -> Self {
        Self {
            content_type: public_config.content_type,
            public_config,
            ui_components: BTreeMap::new(),
            search: None,
            prompt: None,
        }
    }

    /// Declare a loader for a component slot.
    pub fn with_component(mut self, slot: ComponentSlot, loader: Arc<dyn ComponentLoader>) -> Self {
        self.ui_components.insert(slot, loader);
        self
    }

    pub fn with_search_builder(mut self, builder: Arc<dyn SearchQueryBuilder>) -> Self {
        self.search = Some(builder);
        self
    }

    pub fn with_prompt_builder(mut self, builder: Arc<dyn PromptBuilder>) -> Self {
        self.prompt = Some(builder);
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn public_config(&self) -> &PluginPublicConfig {
        &self.public_config
    }

    /// Loader declared for a slot, if any.
    pub fn component_loader(&self, slot: ComponentSlot) -> Option<&Arc<dyn ComponentLoader>> {
        self.ui_components.get(&slot)
    }

    /// Slots this plugin declares loaders for.
    pub fn declared_slots(&self) -> impl Iterator<Item = ComponentSlot> + '_ {
        self.ui_components.keys().copied()
    }

    pub fn search_builder(&self) -> Option<&Arc<dyn SearchQueryBuilder>> {
        self.search.as_ref()
    }

    pub fn prompt_builder(&self) -> Option<&Arc<dyn PromptBuilder>> {
        self.prompt.as_ref()
    }

    /// Check for a capability.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::UiComponents => !self.ui_components.is_empty(),
            Capability::SearchBuilder => self.search.is_some(),
            Capability::PromptBuilder => self.prompt.is_some(),
        }
    }

    /// All capabilities this plugin provides.
    pub fn capabilities(&self) -> Vec<Capability> {
        [
            Capability::UiComponents,
            Capability::SearchBuilder,
            Capability::PromptBuilder,
        ]
        .into_iter()
        .filter(|c| self.has(*c))
        .collect()
    }
}

/// First plugin registered for a content type.
pub fn find_plugin(
    plugins: &[Arc<PluginDescriptor>],
    content_type: ContentType,
) -> Option<&Arc<PluginDescriptor>> {
    plugins.iter().find(|p| p.content_type() == content_type)
}
