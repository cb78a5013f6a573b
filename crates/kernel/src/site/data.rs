//! Static site data.
//!
//! Loaded once from `site-data.json` (written by the site build) and turned
//! into typed form. Field names follow the JSON file, which is camelCase.

use std::collections::BTreeMap;
use std::path::Path;

use nexlog_sdk::types::{ComponentSlot, ContentType};
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Everything the site build knows about the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteData {
    pub configs: SiteConfigData,
    pub context: SiteContext,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Configuration section of the site data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfigData {
    #[serde(default)]
    pub plugins: Vec<PluginPublicConfig>,
    pub content_config: ContentConfig,
}

/// Where content lives and what to leave out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    #[serde(default)]
    pub exclude: Vec<String>,
    pub posts_path: String,
}

/// Kind of site, used to tune the prompt persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Blog,
    Personal,
    Knowledgebase,
}

/// Descriptive context of the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContext {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub site_type: SiteType,
    /// Free-text persona the generated answers should speak in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
}

/// A content category shown on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Public (serializable) part of a content plugin's configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginPublicConfig {
    #[serde(rename = "type")]
    pub content_type: ContentType,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Component manifest per slot, relative to the site data file.
    #[serde(default)]
    pub components: BTreeMap<ComponentSlot, String>,

    /// Plugin-specific options, passed through untouched.
    #[serde(default)]
    pub options: serde_json::Value,
}

fn default_enabled() -> bool {
    true
}

impl PluginPublicConfig {
    /// Config for a content type with no components and no options.
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            enabled: true,
            components: BTreeMap::new(),
            options: serde_json::Value::Null,
        }
    }
}

impl SiteData {
    /// Parse site data from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a site data file.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let json =
            std::fs::read_to_string(path).map_err(|source| ConfigurationError::UnreadableSiteData {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(&json)
    }

    /// Public configs of the enabled plugins, in file order.
    pub fn enabled_plugins(&self) -> impl Iterator<Item = &PluginPublicConfig> {
        self.configs.plugins.iter().filter(|p| p.enabled)
    }
}
