//! Plugin component loader - resolves custom UI components in the background.
//!
//! Each plugin gets its own task, and each declared slot its own loader
//! task inside it, so a slow, failing or panicking loader only affects its
//! own slot. Results are written through [`SiteDataState::apply`] as they
//! arrive; the aggregate future completes once every plugin is done.

use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use nexlog_sdk::component::ComponentRef;
use nexlog_sdk::types::{ComponentSlot, ContentType};
use serde::Serialize;
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::{Capability, ComponentLoadFailure, PluginDescriptor};
use crate::site::{ApplyResult, SiteDataState, SlotOutcome};

/// Counts of what a resolution pass did.
///
/// `resolved` and `fallback` only count results that changed a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Plugins whose components were loaded.
    pub plugins: usize,
    /// Slots upgraded to a plugin component.
    pub resolved: usize,
    /// Slots where the plugin explicitly supplied no component.
    pub fallback: usize,
    /// Slots whose loader failed; they keep the default.
    pub failed: usize,
    /// Results for slots that had already finished resolving.
    pub unchanged: usize,
    /// Results dropped because the session had ended.
    pub suppressed: usize,
}

impl LoadReport {
    fn merge(&mut self, other: LoadReport) {
        self.plugins += other.plugins;
        self.resolved += other.resolved;
        self.fallback += other.fallback;
        self.failed += other.failed;
        self.unchanged += other.unchanged;
        self.suppressed += other.suppressed;
    }
}

/// Resolves plugin components into a [`SiteDataState`].
#[derive(Debug, Clone, Default)]
pub struct PluginComponentLoader {
    timeout: Option<Duration>,
}

impl PluginComponentLoader {
    /// Loader with no per-slot time limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat a slot load that takes longer than `timeout` as failed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve the components of every plugin concurrently.
    ///
    /// Only the first plugin per content type is loaded, matching the slots
    /// [`SiteDataState::initialize`] marked as resolving. Writes stop as soon
    /// as `token` is cancelled or the session is closed.
    pub async fn resolve_all(
        &self,
        plugins: &[Arc<PluginDescriptor>],
        state: &Arc<SiteDataState>,
        token: CancellationToken,
    ) -> LoadReport {
        let mut seen = HashSet::new();
        let mut join_set = JoinSet::new();

        for plugin in plugins {
            if !seen.insert(plugin.content_type()) {
                debug!(
                    content_type = %plugin.content_type(),
                    "plugin shadowed by an earlier plugin for the same content type"
                );
                continue;
            }
            if !plugin.has(Capability::UiComponents) {
                continue;
            }

            let plugin = Arc::clone(plugin);
            let state = Arc::clone(state);
            let token = token.clone();
            let timeout = self.timeout;
            join_set.spawn(async move { resolve_plugin(plugin, state, token, timeout).await });
        }

        let mut report = LoadReport::default();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(plugin_report) => report.merge(plugin_report),
                Err(e) => error!(error = %e, "plugin component task failed"),
            }
        }

        info!(
            session_id = %state.session_id(),
            plugins = report.plugins,
            resolved = report.resolved,
            fallback = report.fallback,
            failed = report.failed,
            unchanged = report.unchanged,
            suppressed = report.suppressed,
            "plugin components resolved"
        );

        report
    }
}

/// How a single slot load ended.
enum SlotResult {
    Loaded(Option<ComponentRef>),
    Failed(ComponentLoadFailure),
    Cancelled,
}

async fn resolve_plugin(
    plugin: Arc<PluginDescriptor>,
    state: Arc<SiteDataState>,
    token: CancellationToken,
    timeout: Option<Duration>,
) -> LoadReport {
    let content_type = plugin.content_type();

    // Each slot is awaited in its own task and applied as soon as it ends
    let mut slots = JoinSet::new();
    for slot in plugin.declared_slots() {
        let Some(loader) = plugin.component_loader(slot).map(Arc::clone) else {
            continue;
        };
        let token = token.clone();
        slots.spawn(async move {
            let handle = tokio::spawn(async move { loader.load().await });
            (slot, await_slot(content_type, slot, handle, timeout, &token).await)
        });
    }

    let mut report = LoadReport {
        plugins: 1,
        ..LoadReport::default()
    };

    while let Some(joined) = slots.join_next().await {
        let (slot, result) = match joined {
            Ok(finished) => finished,
            Err(e) => {
                error!(
                    content_type = %content_type,
                    error = %e,
                    "component slot task failed"
                );
                continue;
            }
        };

        let (outcome, applied) = match result {
            SlotResult::Loaded(Some(component)) => {
                debug!(
                    content_type = %content_type,
                    slot = %slot,
                    component = %component.name,
                    "component loaded"
                );
                (SlotOutcome::Resolved(component), Some(&mut report.resolved))
            }
            SlotResult::Loaded(None) => (SlotOutcome::Fallback, Some(&mut report.fallback)),
            SlotResult::Failed(failure) => {
                warn!(
                    content_type = %content_type,
                    slot = %slot,
                    error = %failure,
                    "component load failed; keeping default"
                );
                report.failed += 1;
                (SlotOutcome::Fallback, None)
            }
            SlotResult::Cancelled => {
                report.suppressed += 1;
                continue;
            }
        };

        match state.apply(content_type, slot, outcome, &token) {
            ApplyResult::Applied => {
                if let Some(count) = applied {
                    *count += 1;
                }
            }
            ApplyResult::Unchanged => report.unchanged += 1,
            ApplyResult::Suppressed => report.suppressed += 1,
        }
    }

    report
}

async fn await_slot(
    content_type: ContentType,
    slot: ComponentSlot,
    handle: JoinHandle<anyhow::Result<Option<ComponentRef>>>,
    timeout: Option<Duration>,
    token: &CancellationToken,
) -> SlotResult {
    let abort = handle.abort_handle();

    let joined = async {
        match timeout {
            Some(after) => tokio::time::timeout(after, handle).await.map_err(|_| after),
            None => Ok(handle.await),
        }
    };

    tokio::select! {
        () = token.cancelled() => {
            abort.abort();
            SlotResult::Cancelled
        }
        joined = joined => match joined {
            Ok(Ok(Ok(component))) => SlotResult::Loaded(component),
            Ok(Ok(Err(source))) => {
                SlotResult::Failed(ComponentLoadFailure::loader(content_type, slot, source))
            }
            Ok(Err(join_error)) => SlotResult::Failed(ComponentLoadFailure::panicked(
                content_type,
                slot,
                join_error_message(join_error),
            )),
            Err(after) => {
                abort.abort();
                SlotResult::Failed(ComponentLoadFailure::timed_out(content_type, slot, after))
            }
        },
    }
}

fn join_error_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    panic_message(err.into_panic())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
