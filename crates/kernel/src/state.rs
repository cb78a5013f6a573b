//! Application state shared across all handlers.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::content::ContentTypeRegistry;
use crate::content_plugins;
use crate::plugin::PluginComponentLoader;
use crate::site::{SiteConfig, SiteData, SiteDataState};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration the process was started with.
    config: Config,

    /// Site data state of the running session.
    site: Arc<SiteDataState>,
}

impl AppState {
    /// Load site data, build plugins, and start component resolution.
    ///
    /// Returns as soon as the defaults are attached; plugin components
    /// resolve in the background.
    pub async fn new(config: &Config) -> Result<Self> {
        let site = load_site(config)?;

        let loader = PluginComponentLoader::new().with_timeout(config.component_load_timeout);
        // Progress is logged by the loader itself
        drop(site.spawn_component_upgrade(loader));

        Ok(Self::from_site(config.clone(), site))
    }

    /// Wrap an already initialized site state.
    pub fn from_site(config: Config, site: Arc<SiteDataState>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, site }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Site data state of the running session.
    pub fn site(&self) -> &Arc<SiteDataState> {
        &self.inner.site
    }
}

/// Load site data and initialize the session state with default components.
pub fn load_site(config: &Config) -> Result<Arc<SiteDataState>> {
    let site_data = SiteData::load(&config.site_data_path).context("failed to load site data")?;
    let base_dir = config
        .site_data_path
        .parent()
        .unwrap_or_else(|| Path::new("."));

    let plugins = content_plugins::build_plugins(&site_data, base_dir);
    let site_config = SiteConfig::from_parts(&site_data, &plugins);

    let site = SiteDataState::initialize(
        site_data,
        &ContentTypeRegistry::builtin(),
        site_config,
        plugins,
    )
    .context("failed to initialize site data state")?;

    info!(
        path = %config.site_data_path.display(),
        plugins = site.plugins().len(),
        "site data loaded"
    );

    Ok(Arc::new(site))
}
