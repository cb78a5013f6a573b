#![allow(clippy::unwrap_used, clippy::expect_used)]
//! HTTP API tests.
//!
//! Requests go through the REAL kernel router via `tower::ServiceExt`.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::*;
use nexlog_kernel::plugin::PluginComponentLoader;
use nexlog_sdk::types::{ComponentSlot, ContentType};
use nexlog_test_utils::{assert, question, search_query};
use serde_json::json;

fn gdocs_app() -> TestApp {
    TestApp::new(build_state(vec![builtin_descriptor(ContentType::GoogleDoc)]))
}

#[tokio::test]
async fn health_reports_session_and_loading() {
    let plugin = builtin_descriptor(ContentType::GoogleDoc)
        .with_component(ComponentSlot::Card, Arc::new(NoneLoader));
    let app = TestApp::new(build_state(vec![plugin]));

    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["session_active"], true);
    assert_eq!(body["loading"], 1);

    app.state.site().close();
    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["session_active"], false);
}

#[tokio::test]
async fn site_lists_context_and_components() {
    let plugin = builtin_descriptor(ContentType::GoogleDoc).with_component(
        ComponentSlot::Card,
        Arc::new(FixedLoader(plugin_component("DocCard"))),
    );
    let app = TestApp::new(build_state(vec![plugin]));

    let (status, body) = app.get_json("/api/site").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["context"]["title"], "Field Notes");
    assert_eq!(body["categories"][0]["title"], "Rust");
    assert_eq!(body["plugins"].as_array().unwrap().len(), 1);
    assert_eq!(body["plugins"][0]["type"], "GoogleDoc");
    assert::component_view(&body["components"]["GoogleDoc"]["card"], "DefaultCard", true);
    assert::component_view(
        &body["components"]["TextDocument"]["list"],
        "DefaultSearchResultsList",
        false,
    );

    app.state
        .site()
        .spawn_component_upgrade(PluginComponentLoader::new())
        .await
        .unwrap();

    let (_, body) = app.get_json("/api/site/components/GoogleDoc").await;
    assert_eq!(body["content_type"], "GoogleDoc");
    assert::component_view(&body["components"]["card"], "DocCard", false);
    assert_eq!(
        body["components"]["card"]["component"]["bundle"],
        "/bundles/DocCard.js"
    );
}

#[tokio::test]
async fn unknown_content_type_is_not_found() {
    let app = gdocs_app();
    let (status, _) = app.get_json("/api/site/components/Spreadsheet").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_merges_query_string_and_body_filters() {
    let app = gdocs_app();
    let body = json!({
        "input": search_query(&["rust"]).to_json(),
        "filters": ["tokio", "ai"],
    });

    let (status, response) = app
        .post_json("/api/search?topics=ai,%20ml&keywords=undefined", &body)
        .await;
    assert_eq!(status, StatusCode::OK, "{response}");
    assert_eq!(response["content_type"], "GoogleDoc");
    assert::json_eq(&response["filters"], &json!(["ai", "ml", "tokio"]));
    assert_eq!(response["url"], "/search?topics=ai%2C%20ml");

    let where_clause = &response["query"]["where"];
    assert_eq!(where_clause["operator"], "And");
    assert_eq!(where_clause["operands"][1]["operator"], "Or");
    assert_eq!(
        where_clause["operands"][1]["operands"].as_array().unwrap().len(),
        3
    );

    let graphql = response["graphql"].as_str().unwrap();
    assert::contains(graphql, "GoogleDoc(where:");
    assert::not_contains(graphql, "generate(");
}

#[tokio::test]
async fn search_with_question_generates() {
    let app = gdocs_app();
    let body = json!({
        "content_type": "GoogleDoc",
        "input": question("Why async?", &["async"]).to_json(),
    });

    let (status, response) = app.post_json("/api/search", &body).await;
    assert_eq!(status, StatusCode::OK, "{response}");
    assert!(response["url"].is_null());
    assert::has_key(&response["query"], "generate");
    assert::contains(response["graphql"].as_str().unwrap(), "groupedResult");
}

#[tokio::test]
async fn search_configuration_errors_are_reported() {
    let app = gdocs_app();
    let body = json!({
        "content_type": "TextDocument",
        "input": search_query(&["rust"]).to_json(),
    });

    let (status, response) = app.post_json("/api/search", &body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert::contains(response.as_str().unwrap(), "TextDocument");
}

#[tokio::test]
async fn search_rejects_malformed_input() {
    let app = gdocs_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"input": {"type": "shout"}}"#))
        .unwrap();

    let (status, _) = app.send_raw(request).await;
    assert!(status.is_client_error(), "got {status}");
}
