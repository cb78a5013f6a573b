#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Everything here drives the REAL kernel code: states are built with
//! `SiteDataState::initialize`, routers with `routes::router`. Only the
//! component loaders are test doubles, so each test controls exactly when
//! and how a slot resolves.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use nexlog_kernel::content::ContentTypeRegistry;
use nexlog_kernel::plugin::{ComponentLoader, PluginDescriptor};
use nexlog_kernel::site::{PluginPublicConfig, SiteConfig, SiteData, SiteDataState};
use nexlog_kernel::{AppState, Config, content_plugins, routes};
use nexlog_sdk::component::{ComponentRef, component};
use nexlog_sdk::types::ContentType;
use nexlog_test_utils::site_data;
use serde_json::Value;
use tokio::sync::Notify;
use tower::ServiceExt;

/// Loader returning a fixed component.
pub struct FixedLoader(pub ComponentRef);

#[async_trait]
impl ComponentLoader for FixedLoader {
    async fn load(&self) -> anyhow::Result<Option<ComponentRef>> {
        Ok(Some(self.0.clone()))
    }
}

/// Loader signalling "no component".
pub struct NoneLoader;

#[async_trait]
impl ComponentLoader for NoneLoader {
    async fn load(&self) -> anyhow::Result<Option<ComponentRef>> {
        Ok(None)
    }
}

/// Loader that always fails.
pub struct FailingLoader;

#[async_trait]
impl ComponentLoader for FailingLoader {
    async fn load(&self) -> anyhow::Result<Option<ComponentRef>> {
        anyhow::bail!("bundle not found")
    }
}

/// Loader that panics.
pub struct PanickingLoader;

#[async_trait]
impl ComponentLoader for PanickingLoader {
    async fn load(&self) -> anyhow::Result<Option<ComponentRef>> {
        panic!("loader exploded")
    }
}

/// Loader that sleeps before returning its component.
pub struct SlowLoader {
    pub delay: Duration,
    pub component: ComponentRef,
}

#[async_trait]
impl ComponentLoader for SlowLoader {
    async fn load(&self) -> anyhow::Result<Option<ComponentRef>> {
        tokio::time::sleep(self.delay).await;
        Ok(Some(self.component.clone()))
    }
}

/// Loader that waits until the test releases it.
pub struct GatedLoader {
    pub gate: Arc<Notify>,
    pub component: ComponentRef,
}

#[async_trait]
impl ComponentLoader for GatedLoader {
    async fn load(&self) -> anyhow::Result<Option<ComponentRef>> {
        self.gate.notified().await;
        Ok(Some(self.component.clone()))
    }
}

/// A plugin component with a bundle, so it is told apart from defaults.
pub fn plugin_component(name: &str) -> ComponentRef {
    component(name)
        .bundle(&format!("/bundles/{name}.js"))
        .build()
}

/// Site data of the blog fixture, without plugins.
pub fn test_site_data() -> SiteData {
    SiteData::from_json(&site_data::blog_site().to_string()).unwrap()
}

/// A bare descriptor for a content type.
pub fn descriptor(content_type: ContentType) -> PluginDescriptor {
    PluginDescriptor::new(PluginPublicConfig::new(content_type))
}

/// The built-in descriptor for a content type, with search and prompt builders.
pub fn builtin_descriptor(content_type: ContentType) -> PluginDescriptor {
    content_plugins::descriptor_for(PluginPublicConfig::new(content_type))
}

/// Initialize a site data state over the given plugins.
pub fn build_state(plugins: Vec<PluginDescriptor>) -> Arc<SiteDataState> {
    let site_data = test_site_data();
    let plugins: Vec<Arc<PluginDescriptor>> = plugins.into_iter().map(Arc::new).collect();
    let config = SiteConfig::from_parts(&site_data, &plugins);

    let state = SiteDataState::initialize(
        site_data,
        &ContentTypeRegistry::builtin(),
        config,
        plugins,
    )
    .expect("site data state should initialize");
    Arc::new(state)
}

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new(site: Arc<SiteDataState>) -> Self {
        let state = AppState::from_site(Config::default(), site);
        let router = routes::router().with_state(state.clone());
        Self { router, state }
    }

    /// GET a path and decode the JSON body.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request and return the status with the raw body text.
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send_raw(request).await;
        let json = serde_json::from_str(&body).unwrap_or(Value::String(body));
        (status, json)
    }
}
