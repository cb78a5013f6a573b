//! Prompt assembly shared by the built-in plugins.

use nexlog_sdk::types::StructuredUserInput;

use crate::plugin::PromptBuilder;
use crate::search::query_context::is_query_empty;
use crate::site::{SiteConfig, SiteData};

/// Assemble a generation prompt.
///
/// Sections, one per paragraph: persona, what the material is, the
/// request, and the output format.
pub fn assemble_prompt(
    site_config: &SiteConfig,
    site_data: &SiteData,
    input: &StructuredUserInput,
    material: &str,
) -> String {
    let mut sections = vec![site_config.copy.persona_instruction(site_data)];

    sections.push(format!("You are given {material}."));

    if !site_data.categories.is_empty() {
        let titles: Vec<&str> = site_data
            .categories
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        sections.push(format!("The site is organized into: {}.", titles.join(", ")));
    }

    sections.push(format!("Request: {}", request_text(input)));
    sections.push(site_config.copy.output_format_instruction(input).to_string());

    sections
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The user's request: raw text if kept and usable, else the parsed terms.
fn request_text(input: &StructuredUserInput) -> String {
    if let Some(raw) = input.input.as_deref()
        && !is_query_empty(Some(raw))
    {
        return raw.trim().to_string();
    }

    input
        .subject_topic
        .iter()
        .chain(input.concepts_key_terms.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt builder for content types without a dedicated one.
#[derive(Debug, Clone, Default)]
pub struct GenericPromptBuilder;

impl PromptBuilder for GenericPromptBuilder {
    fn create(
        &self,
        site_config: &SiteConfig,
        site_data: &SiteData,
        input: &StructuredUserInput,
    ) -> String {
        assemble_prompt(site_config, site_data, input, "the documents published on this site")
    }
}
