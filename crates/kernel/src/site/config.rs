//! Merged site configuration.
//!
//! Combines the content config from the site data, the prompt configuration
//! contributed by the plugins, and the copy used to assemble prompts.

use std::sync::Arc;

use nexlog_sdk::types::{ContentType, StructuredUserInput, UserInputType};

use super::data::{ContentConfig, SiteData, SiteType};
use crate::plugin::{PluginDescriptor, PromptBuilder};

/// Prompt builder registered for one content type.
#[derive(Clone)]
pub struct PromptConfig {
    pub content_type: ContentType,
    pub builder: Arc<dyn PromptBuilder>,
}

impl std::fmt::Debug for PromptConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptConfig")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Search-related configuration.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    pub prompts: Vec<PromptConfig>,
}

impl SearchConfig {
    /// First prompt config registered for a content type.
    pub fn prompt_for(&self, content_type: ContentType) -> Option<&PromptConfig> {
        self.prompts.iter().find(|p| p.content_type == content_type)
    }
}

/// Text fragments prompts are assembled from.
#[derive(Debug, Clone)]
pub struct CopyConfig {
    /// Persona line; `{title}` and `{description}` are substituted.
    pub persona_template: String,
    /// Output format instruction for answers.
    pub answer_format: String,
    /// Output format instruction for plain searches (forced generation).
    pub search_format: String,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            persona_template: "You are the author of \"{title}\". {description}".to_string(),
            answer_format: "Answer in a few short paragraphs of markdown, citing the documents you used."
                .to_string(),
            search_format: "Summarize what the matched documents have in common in two sentences."
                .to_string(),
        }
    }
}

impl CopyConfig {
    /// Persona instruction for the site.
    pub fn persona_instruction(&self, site_data: &SiteData) -> String {
        if let Some(ref persona) = site_data.context.persona {
            return persona.clone();
        }

        let mut persona = self
            .persona_template
            .replace("{title}", &site_data.context.title)
            .replace("{description}", &site_data.context.description);
        if site_data.context.site_type == SiteType::Knowledgebase {
            persona.push_str(" Stay factual and neutral.");
        }
        persona.trim().to_string()
    }

    /// Output format instruction for an input.
    pub fn output_format_instruction(&self, input: &StructuredUserInput) -> &str {
        match input.input_type {
            UserInputType::SearchQuery => &self.search_format,
            UserInputType::Question | UserInputType::Conversational => &self.answer_format,
        }
    }
}

/// Full configuration used at query time.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub content_config: ContentConfig,
    pub search: SearchConfig,
    pub copy: CopyConfig,
}

impl SiteConfig {
    /// Merge the site data's content config with the plugins' prompt builders.
    pub fn from_parts(site_data: &SiteData, plugins: &[Arc<PluginDescriptor>]) -> Self {
        let prompts = plugins
            .iter()
            .filter_map(|plugin| {
                plugin.prompt_builder().map(|builder| PromptConfig {
                    content_type: plugin.content_type(),
                    builder: Arc::clone(builder),
                })
            })
            .collect();

        Self {
            content_config: site_data.configs.content_config.clone(),
            search: SearchConfig { prompts },
            copy: CopyConfig::default(),
        }
    }
}
