//! Site data, merged configuration, and the session state built from them.

mod cell;
mod config;
mod data;
mod state;

pub use cell::{ComponentCell, ComponentState, ComponentView};
pub use config::{CopyConfig, PromptConfig, SearchConfig, SiteConfig};
pub use data::{
    Category, ContentConfig, PluginPublicConfig, SiteConfigData, SiteContext, SiteData, SiteType,
};
pub use state::{ApplyResult, PerContentTypeView, SiteDataState, SlotOutcome};
