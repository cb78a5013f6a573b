//! Prompt builder for Google Docs.

use nexlog_sdk::types::StructuredUserInput;

use crate::content_plugins::prompt::assemble_prompt;
use crate::plugin::PromptBuilder;
use crate::site::{SiteConfig, SiteData};

#[derive(Debug, Clone, Default)]
pub struct GoogleDocPromptBuilder;

impl PromptBuilder for GoogleDocPromptBuilder {
    fn create(
        &self,
        site_config: &SiteConfig,
        site_data: &SiteData,
        input: &StructuredUserInput,
    ) -> String {
        assemble_prompt(
            site_config,
            site_data,
            input,
            "the posts of this site, written as Google Docs; use their titles, summaries and topics",
        )
    }
}
