//! Integration tests for the explorer HTTP routes.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` against
//! a fake catalog.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use catalog_explorer_integration_tests::{FakeCatalog, basic_products};
use serde_json::json;
use tower::ServiceExt;

const FORM: &str = "application/x-www-form-urlencoded";

async fn send(app: &Router, method: Method, uri: &str, form: Option<&str>) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match form {
        Some(form) => {
            request = request.header(header::CONTENT_TYPE, FORM);
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn explorer() -> (FakeCatalog, Router) {
    let catalog = FakeCatalog::start().await;
    let app = catalog_explorer_storefront::app(catalog.app_state(20));
    (catalog, app)
}

#[tokio::test]
async fn test_health() {
    let (_catalog, app) = explorer().await;
    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_reflects_catalog() {
    let (catalog, app) = explorer().await;
    let response = send(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    catalog.respond_graphql(json!({"errors": [{"message": "down for maintenance"}]}));
    let response = send(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_index_performs_initial_load() {
    let (catalog, app) = explorer().await;
    catalog.respond_graphql(json!({"data": {"productsBasic": basic_products(20)}}));

    let response = send(&app, Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert_eq!(html.matches(r#"class="product-card""#).count(), 20);
    assert!(html.contains(r#"value="basic" checked"#));
    assert!(html.contains("Page 1"));
    assert!(html.contains("id, name, sku, price, stockQuantity"));
    assert_eq!(catalog.requests_to("/graphql").len(), 1);
}

#[tokio::test]
async fn test_index_shows_load_error() {
    let (catalog, app) = explorer().await;
    catalog.respond_graphql(json!({"errors": [{"message": "Query too complex"}]}));

    let response = send(&app, Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Query too complex"));
}

#[tokio::test]
async fn test_generation_controls_show_progress_while_in_flight() {
    let (_catalog, app) = explorer().await;
    let html = body_text(send(&app, Method::GET, "/", None).await).await;

    let form_start = html.find(r#"<form class="custom-generation""#).unwrap();
    let form_end = form_start + html[form_start..].find("</form>").unwrap();
    let custom_form = &html[form_start..form_end];
    assert!(custom_form.contains(r##"hx-indicator="#custom-generation-progress""##));

    assert!(html.contains(
        r#"<div id="custom-generation-progress" class="generation-status progress htmx-indicator">Generating custom data... This may take a while.</div>"#
    ));
    assert!(html.contains(r##"hx-indicator="#generation-progress""##));
    assert!(html.contains("Generating 50,000 products... This may take several minutes."));
}

#[tokio::test]
async fn test_variant_selection_returns_results_fragment() {
    let (catalog, app) = explorer().await;
    catalog.respond_graphql(json!({"data": {"productsWithPagination": basic_products(3)}}));

    let response = send(&app, Method::POST, "/explorer/variant", Some("variant=allFields")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert_eq!(html.matches(r#"class="product-card""#).count(), 3);
    assert!(html.contains("Records Returned"));
    assert!(!html.contains("<html"));

    let last = catalog.requests_to("/graphql").pop().unwrap();
    assert!(
        last.body["query"]
            .as_str()
            .unwrap()
            .contains("productsWithPagination")
    );
}

#[tokio::test]
async fn test_unknown_variant_is_bad_request() {
    let (catalog, app) = explorer().await;
    let response = send(&app, Method::POST, "/explorer/variant", Some("variant=everything")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(catalog.requests().is_empty());
}

#[tokio::test]
async fn test_previous_on_first_page_is_no_content() {
    let (catalog, app) = explorer().await;
    let response = send(&app, Method::POST, "/explorer/page/previous", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(catalog.requests().is_empty());
}

#[tokio::test]
async fn test_search_is_debounced() {
    let (catalog, app) = explorer().await;

    let (first, second) = tokio::join!(
        send(&app, Method::POST, "/explorer/search", Some("q=la")),
        async {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            send(&app, Method::POST, "/explorer/search", Some("q=lamp")).await
        }
    );

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.status(), StatusCode::OK);

    let requests = catalog.requests_to("/graphql");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body["variables"]["namePattern"], "lamp");
}

#[tokio::test]
async fn test_load_error_retargets_error_panel() {
    let (catalog, app) = explorer().await;
    catalog.respond_graphql(json!({"errors": [{"message": "Unknown field"}]}));

    let response = send(&app, Method::GET, "/explorer/products", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["HX-Retarget"], "#error-state");
    assert!(body_text(response).await.contains("Unknown field"));
}

#[tokio::test]
async fn test_fixed_generation_status_fragment() {
    let (catalog, app) = explorer().await;

    let response = send(&app, Method::POST, "/explorer/generate/fixed", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Data generation started!"));
    assert!(html.contains("load delay:5000ms"));
    assert_eq!(catalog.requests_to("/api/data-generation/generate-50k").len(), 1);
}

#[tokio::test]
async fn test_custom_generation_with_empty_count_sends_nothing() {
    let (catalog, app) = explorer().await;

    let response = send(
        &app,
        Method::POST,
        "/explorer/generate/custom",
        Some("brands=20&categories=&products=5000"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(catalog.requests().is_empty());
}

#[tokio::test]
async fn test_custom_generation_with_invalid_count_shows_error() {
    let (catalog, app) = explorer().await;

    let response = send(
        &app,
        Method::POST,
        "/explorer/generate/custom",
        Some("brands=20&categories=0&products=5000"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("generation-status error"));
    assert!(html.contains("categories"));
    assert!(catalog.requests().is_empty());
}
