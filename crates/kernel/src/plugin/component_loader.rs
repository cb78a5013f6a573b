//! Built-in component loaders.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use nexlog_sdk::component::ComponentRef;

use super::ComponentLoader;

/// Loader that resolves to a fixed value.
///
/// Used by plugins compiled into the kernel, which know their components
/// up front.
#[derive(Debug, Clone)]
pub struct StaticComponentLoader {
    component: Option<ComponentRef>,
}

impl StaticComponentLoader {
    pub fn new(component: ComponentRef) -> Self {
        Self {
            component: Some(component),
        }
    }

    /// Loader that signals "no component".
    pub fn none() -> Self {
        Self { component: None }
    }
}

#[async_trait]
impl ComponentLoader for StaticComponentLoader {
    async fn load(&self) -> anyhow::Result<Option<ComponentRef>> {
        Ok(self.component.clone())
    }
}

/// Loader that reads a component manifest from disk.
///
/// The manifest is a JSON [`ComponentRef`], or `null` for "no component".
#[derive(Debug, Clone)]
pub struct ManifestComponentLoader {
    path: PathBuf,
}

impl ManifestComponentLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl ComponentLoader for ManifestComponentLoader {
    async fn load(&self) -> anyhow::Result<Option<ComponentRef>> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read component manifest {}", self.path.display()))?;
        let component: Option<ComponentRef> = serde_json::from_str(&json)
            .with_context(|| format!("invalid component manifest {}", self.path.display()))?;
        Ok(component)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn temp_manifest(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nexlog-manifest-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn static_loader_returns_its_value() {
        let loader = StaticComponentLoader::new(ComponentRef::builtin("DocCard"));
        let c = loader.load().await.unwrap().unwrap();
        assert_eq!(c.name, "DocCard");

        assert!(StaticComponentLoader::none().load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn manifest_loader_reads_component() {
        let path = temp_manifest(
            "card.json",
            r#"{"name": "DocCard", "bundle": "/plugins/gdocs/card.js"}"#,
        );
        let c = ManifestComponentLoader::new(&path).load().await.unwrap().unwrap();
        assert_eq!(c.name, "DocCard");
        assert!(c.is_external());
    }

    #[tokio::test]
    async fn manifest_null_means_no_component() {
        let path = temp_manifest("none.json", "null");
        assert!(ManifestComponentLoader::new(&path).load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_manifest_is_an_error() {
        let loader = ManifestComponentLoader::new("/nonexistent/card.json");
        let err = loader.load().await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/card.json"));
    }
}
