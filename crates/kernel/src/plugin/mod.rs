//! Content plugin system.
//!
//! Descriptors, the capability traits plugins implement, built-in component
//! loaders, and the background component loader.

mod component_loader;
mod descriptor;
mod error;
mod loader;

pub use component_loader::{ManifestComponentLoader, StaticComponentLoader};
pub use descriptor::{
    Capability, ComponentLoader, PluginDescriptor, PromptBuilder, SearchQueryBuilder, find_plugin,
};
pub use error::ComponentLoadFailure;
pub use loader::{LoadReport, PluginComponentLoader};
