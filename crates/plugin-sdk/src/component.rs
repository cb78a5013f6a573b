//! Component reference builder API.
//!
//! The kernel never renders anything. A component is a serializable
//! reference the rendering layer resolves to an actual UI component: a name,
//! an optional bundle to import it from, and static props.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A renderable component, as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRef {
    /// Component name the renderer looks up.
    pub name: String,

    /// Script bundle that exports the component. `None` for built-ins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,

    /// Static props merged into the component's runtime props.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
}

impl ComponentRef {
    /// Reference to a built-in component with no props.
    pub fn builtin(name: &str) -> Self {
        Self {
            name: name.into(),
            bundle: None,
            props: Map::new(),
        }
    }

    /// True when the renderer must import a bundle to use this component.
    pub fn is_external(&self) -> bool {
        self.bundle.is_some()
    }
}

/// Builder for component references.
pub struct ComponentBuilder {
    name: String,
    bundle: Option<String>,
    classes: Vec<String>,
    props: Map<String, Value>,
}

impl ComponentBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            bundle: None,
            classes: Vec::new(),
            props: Map::new(),
        }
    }

    pub fn bundle(mut self, url: &str) -> Self {
        self.bundle = Some(url.into());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> ComponentRef {
        let mut props = self.props;
        if !self.classes.is_empty() {
            props.insert("className".into(), Value::String(self.classes.join(" ")));
        }

        ComponentRef {
            name: self.name,
            bundle: self.bundle,
            props,
        }
    }
}

/// Start building a component reference.
pub fn component(name: &str) -> ComponentBuilder {
    ComponentBuilder::new(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn builder_joins_classes_into_class_name() {
        let c = component("SearchResultsList")
            .class("grid")
            .class("grid-cols-3")
            .prop("columns", 3)
            .build();

        assert_eq!(c.props["className"], "grid grid-cols-3");
        assert_eq!(c.props["columns"], 3);
        assert!(!c.is_external());
    }

    #[test]
    fn builtin_serializes_without_empty_fields() {
        let json = serde_json::to_value(ComponentRef::builtin("DefaultCard")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "DefaultCard"}));
    }

    #[test]
    fn manifest_with_bundle_roundtrips() {
        let json = r#"{"name":"DocCard","bundle":"/plugins/gdocs/card.js"}"#;
        let c: ComponentRef = serde_json::from_str(json).unwrap();
        assert!(c.is_external());
        assert_eq!(c.bundle.as_deref(), Some("/plugins/gdocs/card.js"));
    }
}
