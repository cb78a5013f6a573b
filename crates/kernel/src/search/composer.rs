//! Query composer.
//!
//! Builds the staged Unbody query for a plugin and a parsed user input:
//!
//! 1. base query scoped to the posts path (always)
//! 2. keyword/topic/entity filter union (when filters are given)
//! 3. semantic "about" search (when the input requires search)
//! 4. generative enrichment (unless the input is a plain search)
//!
//! The composer only builds; executing the query belongs to the service
//! client.

use nexlog_sdk::query::UnbodyQuery;
use nexlog_sdk::types::{ContentType, StructuredUserInput};

use crate::error::ConfigurationError;
use crate::plugin::PluginDescriptor;
use crate::site::{SiteConfig, SiteData};

/// Minimum similarity for the semantic search stage.
pub const ABOUT_CERTAINTY: f64 = 0.6;

/// Field the base path filter applies to.
pub const PATH_FIELD: &str = "pathString";

/// Classification fields the filter union is tested against.
pub const FILTER_FIELDS: [&str; 3] = ["autoKeywords", "autoTopics", "autoEntities"];

/// Fields requested from the generative stage.
pub const GENERATED_FIELDS: [&str; 5] = [
    "autoKeywords",
    "autoTopics",
    "autoEntities",
    "autoSummary",
    "title",
];

/// Fields selected for plugins without their own search builder.
pub const DEFAULT_FIELDS: [&str; 8] = [
    "title",
    "summary",
    "autoSummary",
    "autoKeywords",
    "autoTopics",
    "autoEntities",
    "pathString",
    "modifiedAt",
];

/// Everything a search-query builder gets to work with.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub site_config: &'a SiteConfig,
    pub site_data: &'a SiteData,
    pub input: &'a StructuredUserInput,
    pub filters: &'a [String],
    /// Replaces the plugin's default field list when set.
    pub fields: Option<&'a [String]>,
    pub force_generate: bool,
}

impl<'a> SearchRequest<'a> {
    /// Request with no filters, default fields, and no forced generation.
    pub fn new(
        site_config: &'a SiteConfig,
        site_data: &'a SiteData,
        input: &'a StructuredUserInput,
    ) -> Self {
        Self {
            site_config,
            site_data,
            input,
            filters: &[],
            fields: None,
            force_generate: false,
        }
    }

    pub fn with_filters(mut self, filters: &'a [String]) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_fields(mut self, fields: &'a [String]) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_force_generate(mut self, force: bool) -> Self {
        self.force_generate = force;
        self
    }
}

/// Build the query for a plugin.
///
/// Plugins with a search builder build their own query; the rest get the
/// generic composition with [`DEFAULT_FIELDS`].
pub fn build_query(
    plugin: &PluginDescriptor,
    request: &SearchRequest<'_>,
) -> Result<UnbodyQuery, ConfigurationError> {
    match plugin.search_builder() {
        Some(builder) => builder.build(request),
        None => compose_query(plugin.content_type(), &DEFAULT_FIELDS, request),
    }
}

/// Compose the four-stage query for a content type.
///
/// Fails with [`ConfigurationError::MissingPromptConfig`] before building
/// anything when no prompt is registered for the content type.
pub fn compose_query(
    content_type: ContentType,
    default_fields: &[&str],
    request: &SearchRequest<'_>,
) -> Result<UnbodyQuery, ConfigurationError> {
    let prompt_config = request
        .site_config
        .search
        .prompt_for(content_type)
        .ok_or(ConfigurationError::MissingPromptConfig { content_type })?;

    let input = request.input;
    let filters = request.filters;
    let posts_path = &request.site_config.content_config.posts_path;

    let query = UnbodyQuery::get(content_type);
    let query = match request.fields {
        Some(fields) => query.select(fields.iter().cloned()),
        None => query.select(default_fields.iter().copied()),
    };

    let mut query = query.filter(|op| {
        let mut operands = vec![op.like(PATH_FIELD, posts_path)];
        if !filters.is_empty() {
            operands.push(op.or(FILTER_FIELDS
                .iter()
                .map(|field| op.contains_any(field, filters))
                .collect()));
        }
        op.and(operands)
    });

    if input.requires_search {
        query = query.about(input.search_terms().to_vec(), ABOUT_CERTAINTY);
    }

    if !input.is_search_only() || request.force_generate {
        let prompt = prompt_config
            .builder
            .create(request.site_config, request.site_data, input);
        query = query.generate_from_many(prompt, GENERATED_FIELDS);
    }

    Ok(query)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Arc;

    use nexlog_sdk::query::Predicate;
    use nexlog_sdk::types::UserInputType;

    use super::*;
    use crate::plugin::PromptBuilder;
    use crate::site::{PluginPublicConfig, PromptConfig};

    struct FixedPrompt;

    impl PromptBuilder for FixedPrompt {
        fn create(&self, _: &SiteConfig, _: &SiteData, _: &StructuredUserInput) -> String {
            "prompt".to_string()
        }
    }

    fn site_data() -> SiteData {
        SiteData::from_json(
            r#"{
                "configs": {"contentConfig": {"postsPath": "/posts"}},
                "context": {"title": "Notes", "siteType": "blog"}
            }"#,
        )
        .unwrap()
    }

    fn site_config(data: &SiteData) -> SiteConfig {
        let mut config = SiteConfig::from_parts(data, &[]);
        config.search.prompts.push(PromptConfig {
            content_type: ContentType::TextDocument,
            builder: Arc::new(FixedPrompt),
        });
        config
    }

    #[test]
    fn generic_plugin_uses_default_fields() {
        let data = site_data();
        let config = site_config(&data);
        let input = StructuredUserInput::new(UserInputType::SearchQuery);
        let plugin = PluginDescriptor::new(PluginPublicConfig::new(ContentType::TextDocument));

        let query = build_query(&plugin, &SearchRequest::new(&config, &data, &input)).unwrap();
        assert_eq!(query.collection(), ContentType::TextDocument);
        assert_eq!(query.fields().len(), DEFAULT_FIELDS.len());
        assert!(matches!(
            query.predicate(),
            Some(Predicate::And { operands }) if operands.len() == 1
        ));
    }

    #[test]
    fn field_overrides_replace_defaults() {
        let data = site_data();
        let config = site_config(&data);
        let input = StructuredUserInput::new(UserInputType::SearchQuery);
        let fields = vec!["title".to_string()];

        let request = SearchRequest::new(&config, &data, &input).with_fields(&fields);
        let query = compose_query(ContentType::TextDocument, &DEFAULT_FIELDS, &request).unwrap();
        assert_eq!(query.fields(), ["title".to_string()]);
    }

    #[test]
    fn conversational_input_generates() {
        let data = site_data();
        let config = site_config(&data);
        let input = StructuredUserInput::new(UserInputType::Conversational);

        let request = SearchRequest::new(&config, &data, &input);
        let query = compose_query(ContentType::TextDocument, &DEFAULT_FIELDS, &request).unwrap();
        let generation = query.generation().unwrap();
        assert_eq!(generation.prompt, "prompt");
        assert_eq!(generation.properties, GENERATED_FIELDS.map(String::from).to_vec());
        assert!(query.about_search().is_none());
    }

    #[test]
    fn missing_prompt_config_fails_before_building() {
        let data = site_data();
        let config = site_config(&data);
        let input = StructuredUserInput::new(UserInputType::SearchQuery);

        let request = SearchRequest::new(&config, &data, &input);
        let err = compose_query(ContentType::GoogleDoc, &DEFAULT_FIELDS, &request).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingPromptConfig {
                content_type: ContentType::GoogleDoc
            }
        ));
    }
}
