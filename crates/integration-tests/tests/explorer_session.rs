//! Integration tests for the explorer load cycle.
//!
//! Each test starts its own in-process fake catalog; no external services
//! are needed.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use catalog_explorer_core::{LookupMode, QueryVariant};
use catalog_explorer_integration_tests::{FakeCatalog, FakeResponse, basic_products};
use catalog_explorer_storefront::catalog::{CatalogError, queries};
use catalog_explorer_storefront::explorer::{LoadOutcome, LoadView};
use serde_json::json;

fn rendered(outcome: LoadOutcome) -> Box<LoadView> {
    match outcome {
        LoadOutcome::Rendered(view) => view,
        LoadOutcome::Superseded => panic!("load was unexpectedly superseded"),
    }
}

// ============================================================================
// Load Cycle
// ============================================================================

#[tokio::test]
async fn test_first_page_basic_listing() {
    let catalog = FakeCatalog::start().await;
    catalog.respond_graphql(json!({"data": {"productsBasic": basic_products(5)}}));
    let session = catalog.session(20);

    let view = rendered(session.reload().await.unwrap());

    let requests = catalog.requests_to("/graphql");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body,
        json!({
            "query": queries::document(LookupMode::Listing, QueryVariant::Basic),
            "variables": {"pageIndex": 0, "pageSize": 20}
        })
    );

    assert_eq!(view.grid_html.matches(r#"class="product-card""#).count(), 5);
    assert_eq!(view.metrics.records_returned, 5);
    assert_eq!(
        view.metrics.fields_requested,
        ["id", "name", "sku", "price", "stockQuantity"]
    );
    // A short page is the last page.
    assert!(!view.pagination.next_enabled);
    assert!(!view.pagination.previous_enabled);
    assert_eq!(view.pagination.label(), "Page 1");
}

#[tokio::test]
async fn test_full_page_enables_next_and_paging_advances() {
    let catalog = FakeCatalog::start().await;
    catalog.respond_graphql(json!({"data": {"productsBasic": basic_products(20)}}));
    let session = catalog.session(20);

    let first = rendered(session.reload().await.unwrap());
    assert!(first.pagination.next_enabled);

    let second = rendered(session.next_page().await.unwrap());
    assert_eq!(second.request.page_index, 1);
    assert!(second.pagination.previous_enabled);
    assert_eq!(second.pagination.label(), "Page 2");

    let back = session.previous_page().await.unwrap().map(rendered).unwrap();
    assert_eq!(back.request.page_index, 0);

    let pages: Vec<_> = catalog
        .requests_to("/graphql")
        .iter()
        .map(|r| r.body["variables"]["pageIndex"].clone())
        .collect();
    assert_eq!(pages, [json!(0), json!(1), json!(0)]);
}

#[tokio::test]
async fn test_search_uses_search_document_and_resets_page() {
    let catalog = FakeCatalog::start().await;
    catalog.respond_graphql(json!({"data": {
        "searchProductsWithBrandAndCategory": [{
            "id": 7, "name": "Desk Lamp", "price": "24.50",
            "brand": {"id": 1, "name": "Lumen"},
            "category": {"id": 2, "name": "Lighting"}
        }]
    }}));
    let session = catalog.session(20);

    let _ = session.next_page().await;
    let _ = session.select_variant(QueryVariant::WithRelations).await;
    let view = rendered(session.search("  lamp ").await.unwrap());

    let last = catalog.requests_to("/graphql").pop().unwrap();
    assert_eq!(
        last.body["query"],
        queries::document(LookupMode::Search, QueryVariant::WithRelations)
    );
    assert_eq!(
        last.body["variables"],
        json!({"pageIndex": 0, "pageSize": 20, "namePattern": "lamp"})
    );

    assert!(view.grid_html.contains("Brand: Lumen"));
    assert!(view.grid_html.contains("Category: Lighting"));
    assert!(view.grid_html.contains("$24.50"));
    assert!(view.metrics.fields_requested.contains(&"brand"));
}

#[tokio::test]
async fn test_clearing_search_returns_to_listing() {
    let catalog = FakeCatalog::start().await;
    let session = catalog.session(20);

    let _ = session.search("lamp").await.unwrap();
    let _ = session.search("   ").await.unwrap();

    let last = catalog.requests_to("/graphql").pop().unwrap();
    assert_eq!(
        last.body["query"],
        queries::document(LookupMode::Listing, QueryVariant::Basic)
    );
    assert!(last.body["variables"].get("namePattern").is_none());
}

#[tokio::test]
async fn test_missing_root_field_renders_no_products() {
    let catalog = FakeCatalog::start().await;
    catalog.respond_graphql(json!({"data": {"somethingElse": []}}));

    let view = rendered(catalog.session(20).reload().await.unwrap());
    assert!(view.products.is_empty());
    assert_eq!(view.metrics.records_returned, 0);
    assert!(view.grid_html.contains("No products found"));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_graphql_errors_surface_first_message() {
    let catalog = FakeCatalog::start().await;
    catalog.respond_graphql(json!({
        "errors": [
            {"message": "Field 'productsBasic' is unavailable"},
            {"message": "second error"}
        ]
    }));
    let session = catalog.session(20);

    let err = session.reload().await.unwrap_err();
    assert!(matches!(&err, CatalogError::Query(m) if m == "Field 'productsBasic' is unavailable"));
    assert!(!err.is_transport());

    // Latency is still recorded for failed loads.
    assert!(session.snapshot().await.last_latency.is_some());
}

#[tokio::test]
async fn test_unreachable_catalog_is_transport_error() {
    let catalog = FakeCatalog::start().await;
    let session = catalog.session(20);
    drop(catalog);
    // Give the aborted server task a moment to release the port.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = session.reload().await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err}");
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let catalog = FakeCatalog::start().await;
    // The first reply is held back long enough for the second load to finish.
    catalog.queue_graphql(
        FakeResponse::ok(json!({"data": {"productsBasic": basic_products(3)}}))
            .delayed(Duration::from_secs(1)),
    );
    catalog.respond_graphql(json!({"data": {"productsWithPagination": basic_products(2)}}));
    let session = catalog.session(20);

    let (slow, fast) = tokio::join!(session.reload(), async {
        // Dispatch the newer load only once the catalog holds the older one.
        catalog.wait_for_requests("/graphql", 1).await;
        session.select_variant(QueryVariant::AllFields).await
    });

    assert!(matches!(slow.unwrap(), LoadOutcome::Superseded));
    let fast = rendered(fast.unwrap());
    assert_eq!(fast.variant, QueryVariant::AllFields);
    assert_eq!(fast.metrics.records_returned, 2);

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.variant, QueryVariant::AllFields);
    assert!(snapshot.requested_fields.contains(&"description"));
}
