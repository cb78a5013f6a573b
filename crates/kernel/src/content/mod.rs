//! Content types and their default UI components.

mod type_registry;

pub use type_registry::{ComponentSet, ContentTypeRegistry};
