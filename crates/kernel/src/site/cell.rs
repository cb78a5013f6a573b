//! Per-slot component cells.
//!
//! A cell holds one `(component, loading)` pair as a small state machine:
//!
//! ```text
//!   Default                      (no loader declared, final)
//!   Resolving ──┬──> Resolved    (plugin component)
//!               └──> Fallback    (none, error, panic, timeout)
//! ```
//!
//! The whole state sits behind one lock, so a reader sees either the state
//! before an update or the state after it.

use nexlog_sdk::component::ComponentRef;
use parking_lot::RwLock;
use serde::Serialize;

/// Resolution state of one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentState {
    /// No plugin loader declared; the default is final.
    Default(ComponentRef),
    /// A plugin loader is running; the default is shown meanwhile.
    Resolving(ComponentRef),
    /// The plugin supplied a component.
    Resolved(ComponentRef),
    /// The plugin supplied nothing or failed; the default stays.
    Fallback(ComponentRef),
}

impl ComponentState {
    /// Component to render now.
    pub fn component(&self) -> &ComponentRef {
        match self {
            ComponentState::Default(c)
            | ComponentState::Resolving(c)
            | ComponentState::Resolved(c)
            | ComponentState::Fallback(c) => c,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ComponentState::Resolving(_))
    }

    /// Whether a plugin component replaced the default.
    pub fn is_upgraded(&self) -> bool {
        matches!(self, ComponentState::Resolved(_))
    }

    /// The `(component, loading)` view handed to the rendering layer.
    pub fn view(&self) -> ComponentView {
        ComponentView {
            component: self.component().clone(),
            loading: self.is_loading(),
        }
    }
}

/// What the rendering layer reads for a slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentView {
    pub component: ComponentRef,
    pub loading: bool,
}

/// Shared, atomically updated slot state.
#[derive(Debug)]
pub struct ComponentCell {
    state: RwLock<ComponentState>,
}

impl ComponentCell {
    /// New cell showing `default`; `Resolving` when a loader is declared.
    pub fn new(default: ComponentRef, has_loader: bool) -> Self {
        let state = if has_loader {
            ComponentState::Resolving(default)
        } else {
            ComponentState::Default(default)
        };
        Self {
            state: RwLock::new(state),
        }
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> ComponentState {
        self.state.read().clone()
    }

    pub fn view(&self) -> ComponentView {
        self.state.read().view()
    }

    /// Replace the default with a plugin component.
    ///
    /// Only valid while resolving; returns whether the cell changed.
    pub fn resolve(&self, component: ComponentRef) -> bool {
        let mut state = self.state.write();
        if !state.is_loading() {
            return false;
        }
        *state = ComponentState::Resolved(component);
        true
    }

    /// Stop resolving and keep the default.
    ///
    /// Only valid while resolving; returns whether the cell changed.
    pub fn fall_back(&self) -> bool {
        let mut state = self.state.write();
        let ComponentState::Resolving(default) = &*state else {
            return false;
        };
        *state = ComponentState::Fallback(default.clone());
        true
    }
}
