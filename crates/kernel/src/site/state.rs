//! Session-lifetime site data state.
//!
//! Built once by [`SiteDataState::initialize`], then shared as an
//! `Arc<SiteDataState>`. The only mutable part is the component cell map,
//! and every write to it goes through [`SiteDataState::apply`], which
//! drops writes once the session has been closed.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use nexlog_sdk::component::ComponentRef;
use nexlog_sdk::types::{ComponentSlot, ContentType};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use super::cell::{ComponentCell, ComponentState, ComponentView};
use super::config::SiteConfig;
use super::data::SiteData;
use crate::content::ContentTypeRegistry;
use crate::error::ConfigurationError;
use crate::plugin::{LoadReport, PluginComponentLoader, PluginDescriptor, find_plugin};

/// Outcome of one slot's resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    /// The plugin supplied a component.
    Resolved(ComponentRef),
    /// Keep the default (none signal, error, panic or timeout).
    Fallback,
}

/// Result of [`SiteDataState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    Applied,
    /// The cell had already finished resolving.
    Unchanged,
    /// The session is closed; nothing was written.
    Suppressed,
}

/// Component cells keyed by content type, then slot.
pub type PerContentTypeView = BTreeMap<ContentType, BTreeMap<ComponentSlot, ComponentView>>;

/// Merged configuration, plugins, and live component cells of one session.
pub struct SiteDataState {
    session_id: Uuid,
    site_data: SiteData,
    config: SiteConfig,
    plugins: Vec<Arc<PluginDescriptor>>,
    per_content_type: HashMap<ContentType, HashMap<ComponentSlot, ComponentCell>>,
    session: CancellationToken,
}

impl std::fmt::Debug for SiteDataState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteDataState")
            .field("session_id", &self.session_id)
            .field("plugins", &self.plugins.len())
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl SiteDataState {
    /// Build the state with default components attached.
    ///
    /// A cell starts `Resolving` exactly when the first plugin registered for
    /// its content type declares a loader for its slot. The returned state is
    /// fully usable; upgrades happen later via
    /// [`spawn_component_upgrade`](Self::spawn_component_upgrade).
    pub fn initialize(
        site_data: SiteData,
        registry: &ContentTypeRegistry,
        config: SiteConfig,
        plugins: Vec<Arc<PluginDescriptor>>,
    ) -> Result<Self, ConfigurationError> {
        registry.validate()?;

        let mut per_content_type = HashMap::new();
        for content_type in ContentType::ALL {
            let defaults = registry.default_components_for(content_type)?;
            let plugin = find_plugin(&plugins, content_type);

            let cells = ComponentSlot::ALL
                .into_iter()
                .map(|slot| {
                    let has_loader = plugin.is_some_and(|p| p.component_loader(slot).is_some());
                    (slot, ComponentCell::new(defaults.get(slot).clone(), has_loader))
                })
                .collect();
            per_content_type.insert(content_type, cells);
        }

        let state = Self {
            session_id: Uuid::now_v7(),
            site_data,
            config,
            plugins,
            per_content_type,
            session: CancellationToken::new(),
        };

        info!(
            session_id = %state.session_id,
            plugins = state.plugins.len(),
            loading = state.loading_count(),
            "site data state initialized"
        );

        Ok(state)
    }

    /// Start resolving plugin components in the background.
    ///
    /// Rendering never waits for this; the handle is only useful to callers
    /// that want the final report.
    pub fn spawn_component_upgrade(
        self: &Arc<Self>,
        loader: PluginComponentLoader,
    ) -> JoinHandle<LoadReport> {
        let state = Arc::clone(self);
        let token = self.session.child_token();
        tokio::spawn(async move {
            let plugins = state.plugins.clone();
            loader.resolve_all(&plugins, &state, token).await
        })
    }

    /// Apply a slot outcome, unless the session is no longer active.
    pub fn apply(
        &self,
        content_type: ContentType,
        slot: ComponentSlot,
        outcome: SlotOutcome,
        token: &CancellationToken,
    ) -> ApplyResult {
        if token.is_cancelled() || !self.is_active() {
            debug!(
                session_id = %self.session_id,
                content_type = %content_type,
                slot = %slot,
                "session closed; component update suppressed"
            );
            return ApplyResult::Suppressed;
        }

        let Some(cell) = self.cell(content_type, slot) else {
            return ApplyResult::Unchanged;
        };

        let changed = match outcome {
            SlotOutcome::Resolved(component) => cell.resolve(component),
            SlotOutcome::Fallback => cell.fall_back(),
        };

        if changed {
            ApplyResult::Applied
        } else {
            ApplyResult::Unchanged
        }
    }

    fn cell(&self, content_type: ContentType, slot: ComponentSlot) -> Option<&ComponentCell> {
        self.per_content_type
            .get(&content_type)
            .and_then(|cells| cells.get(&slot))
    }

    /// Current state of a slot.
    pub fn component_state(
        &self,
        content_type: ContentType,
        slot: ComponentSlot,
    ) -> Option<ComponentState> {
        self.cell(content_type, slot).map(ComponentCell::snapshot)
    }

    /// `(component, loading)` view of a slot.
    pub fn component(&self, content_type: ContentType, slot: ComponentSlot) -> Option<ComponentView> {
        self.cell(content_type, slot).map(ComponentCell::view)
    }

    /// Views of every slot of one content type.
    pub fn components_for(
        &self,
        content_type: ContentType,
    ) -> Option<BTreeMap<ComponentSlot, ComponentView>> {
        self.per_content_type.get(&content_type).map(|cells| {
            cells
                .iter()
                .map(|(slot, cell)| (*slot, cell.view()))
                .collect()
        })
    }

    /// Views of every slot of every content type.
    pub fn per_content_type(&self) -> PerContentTypeView {
        ContentType::ALL
            .into_iter()
            .filter_map(|t| self.components_for(t).map(|views| (t, views)))
            .collect()
    }

    /// Number of slots still resolving.
    pub fn loading_count(&self) -> usize {
        self.per_content_type
            .values()
            .flat_map(|cells| cells.values())
            .filter(|cell| cell.snapshot().is_loading())
            .count()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn site_data(&self) -> &SiteData {
        &self.site_data
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Plugins in configuration order.
    pub fn plugins(&self) -> &[Arc<PluginDescriptor>] {
        &self.plugins
    }

    /// First plugin registered for a content type.
    pub fn plugin_for(&self, content_type: ContentType) -> Option<&Arc<PluginDescriptor>> {
        find_plugin(&self.plugins, content_type)
    }

    /// Whether the owning session is still alive.
    pub fn is_active(&self) -> bool {
        !self.session.is_cancelled()
    }

    /// End the session. Pending component loads stop writing.
    pub fn close(&self) {
        if !self.session.is_cancelled() {
            info!(session_id = %self.session_id, "site data session closed");
        }
        self.session.cancel();
    }
}
