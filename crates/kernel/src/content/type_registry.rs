//! Content type registry.
//!
//! Holds the default component set of every supported content type. The
//! defaults are what the rendering layer uses until (and unless) a plugin
//! supplies its own components.

use std::collections::HashMap;

use nexlog_sdk::component::{self, ComponentRef};
use nexlog_sdk::types::{ComponentSlot, ContentType};
use tracing::debug;

use crate::error::ConfigurationError;

/// One component per slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSet {
    pub list: ComponentRef,
    pub card: ComponentRef,
    pub card_with_refs: ComponentRef,
}

impl ComponentSet {
    /// Component registered for a slot.
    pub fn get(&self, slot: ComponentSlot) -> &ComponentRef {
        match slot {
            ComponentSlot::List => &self.list,
            ComponentSlot::Card => &self.card,
            ComponentSlot::CardWithRefs => &self.card_with_refs,
        }
    }
}

/// Registry of default components per content type.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeRegistry {
    defaults: HashMap<ContentType, ComponentSet>,
}

impl ContentTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in defaults for every supported content type.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            ContentType::GoogleDoc,
            ComponentSet {
                list: component::component("DefaultSearchResultsList")
                    .class("grid")
                    .class("grid-cols-3")
                    .class("gap-4")
                    .prop("layout", "blocks")
                    .build(),
                card: ComponentRef::builtin("DefaultCard"),
                card_with_refs: ComponentRef::builtin("DefaultCardWithRefs"),
            },
        );
        registry.register(
            ContentType::TextDocument,
            ComponentSet {
                list: ComponentRef::builtin("DefaultSearchResultsList"),
                card: ComponentRef::builtin("DefaultCard"),
                card_with_refs: ComponentRef::builtin("DefaultCardWithRefs"),
            },
        );
        registry
    }

    /// Register (or replace) the default set for a content type.
    pub fn register(&mut self, content_type: ContentType, set: ComponentSet) {
        debug!(content_type = %content_type, "registered default components");
        self.defaults.insert(content_type, set);
    }

    /// Check that every supported content type has a complete default set.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for content_type in ContentType::ALL {
            if !self.contains(content_type) {
                return Err(ConfigurationError::MissingDefaults { content_type });
            }
        }
        Ok(())
    }

    /// Default component set for a content type.
    pub fn default_components_for(
        &self,
        content_type: ContentType,
    ) -> Result<&ComponentSet, ConfigurationError> {
        self.defaults
            .get(&content_type)
            .ok_or(ConfigurationError::MissingDefaults { content_type })
    }

    /// Check if a content type has defaults registered.
    pub fn contains(&self, content_type: ContentType) -> bool {
        self.defaults.contains_key(&content_type)
    }

    /// Get the number of registered content types.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_content_type() {
        let registry = ContentTypeRegistry::builtin();
        assert!(registry.validate().is_ok());
        assert_eq!(registry.len(), ContentType::ALL.len());

        for content_type in ContentType::ALL {
            let set = registry.default_components_for(content_type).unwrap();
            for slot in ComponentSlot::ALL {
                assert!(!set.get(slot).name.is_empty());
            }
        }
    }

    #[test]
    fn missing_type_fails_validation() {
        let mut registry = ContentTypeRegistry::new();
        registry.register(
            ContentType::GoogleDoc,
            ComponentSet {
                list: ComponentRef::builtin("L"),
                card: ComponentRef::builtin("C"),
                card_with_refs: ComponentRef::builtin("R"),
            },
        );

        let err = registry.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingDefaults {
                content_type: ContentType::TextDocument
            }
        ));
        assert!(registry.contains(ContentType::GoogleDoc));
        assert!(!registry.contains(ContentType::TextDocument));
        assert!(registry.default_components_for(ContentType::TextDocument).is_err());
    }

    #[test]
    fn slot_lookup_matches_fields() {
        let registry = ContentTypeRegistry::builtin();
        let set = registry.default_components_for(ContentType::GoogleDoc).unwrap();
        assert_eq!(set.get(ComponentSlot::Card).name, "DefaultCard");
        assert_eq!(set.get(ComponentSlot::CardWithRefs).name, "DefaultCardWithRefs");
        assert_eq!(set.get(ComponentSlot::List).props["layout"], "blocks");
    }
}
