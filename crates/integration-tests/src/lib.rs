//! Integration tests for Catalog Explorer.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-explorer-integration-tests
//! ```
//!
//! No external services are needed: [`FakeCatalog`] serves the catalog's
//! GraphQL and data-generation endpoints in-process on an ephemeral port and
//! records every request it receives.
//!
//! # Test Categories
//!
//! - `explorer_session` - Load cycle against the catalog (documents, variables, ordering)
//! - `generation` - Data-generation triggers
//! - `storefront_routes` - Explorer router driven with `tower::ServiceExt::oneshot`

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{OriginalUri, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use catalog_explorer_storefront::catalog::CatalogClient;
use catalog_explorer_storefront::config::{CatalogConfig, ExplorerConfig, SentryConfig};
use catalog_explorer_storefront::explorer::ExplorerSession;
use catalog_explorer_storefront::state::AppState;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request received by the fake catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Request path, e.g. `/graphql`.
    pub path: String,
    /// Raw query string, if any.
    pub query: Option<String>,
    /// JSON body (`null` when the request had none).
    pub body: Value,
}

/// A canned reply.
#[derive(Debug, Clone)]
pub struct FakeResponse {
    pub status: StatusCode,
    pub body: Value,
    /// Wait this long before answering.
    pub delay: Duration,
}

impl FakeResponse {
    /// Immediate `200 OK` with a JSON body.
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    /// Same reply, sent after `delay`.
    #[must_use]
    pub fn delayed(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }
}

#[derive(Debug)]
struct FakeState {
    requests: Mutex<Vec<RecordedRequest>>,
    /// One-shot GraphQL replies, consumed in arrival order.
    queued_graphql: Mutex<VecDeque<FakeResponse>>,
    graphql: Mutex<FakeResponse>,
    generation: Mutex<FakeResponse>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process stand-in for the catalog backend.
///
/// By default GraphQL answers `{"data": {}}` and the generation endpoints
/// answer `200 {"status": "in_progress"}`.
pub struct FakeCatalog {
    addr: SocketAddr,
    state: Arc<FakeState>,
    server: JoinHandle<()>,
}

impl FakeCatalog {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = Arc::new(FakeState {
            requests: Mutex::new(Vec::new()),
            queued_graphql: Mutex::new(VecDeque::new()),
            graphql: Mutex::new(FakeResponse::ok(json!({"data": {}}))),
            generation: Mutex::new(FakeResponse::ok(json!({
                "status": "in_progress",
                "message": "Data generation started"
            }))),
        });

        let app = Router::new()
            .route("/graphql", post(graphql))
            .route("/api/data-generation/generate-50k", post(generation))
            .route("/api/data-generation/generate-custom", post(generation))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let addr = listener.local_addr().expect("Failed to read fake catalog address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Base URL of the fake catalog.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Catalog configuration pointing at this fake.
    ///
    /// # Panics
    ///
    /// Panics if the base URL does not parse (it always does).
    #[must_use]
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: CatalogConfig::normalize_base_url(&self.base_url())
                .expect("fake catalog URL is valid"),
            request_timeout: Some(Duration::from_secs(5)),
        }
    }

    /// Catalog client pointing at this fake.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.catalog_config()).expect("Failed to build catalog client")
    }

    /// Explorer session with the given page size.
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero.
    #[must_use]
    pub fn session(&self, page_size: u32) -> ExplorerSession {
        ExplorerSession::new(
            self.client(),
            NonZeroU32::new(page_size).expect("page size must be positive"),
        )
    }

    /// Explorer application state with a short search debounce.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built.
    #[must_use]
    pub fn app_state(&self, page_size: u32) -> AppState {
        let config = ExplorerConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            catalog: self.catalog_config(),
            page_size: NonZeroU32::new(page_size).expect("page size must be positive"),
            search_debounce: Duration::from_millis(20),
            sentry: SentryConfig::default(),
        };
        AppState::new(config).expect("Failed to build app state")
    }

    /// Answer every GraphQL request with `body` (after queued replies run out).
    pub fn respond_graphql(&self, body: Value) {
        *lock(&self.state.graphql) = FakeResponse::ok(body);
    }

    /// Answer the next GraphQL request with `response`.
    pub fn queue_graphql(&self, response: FakeResponse) {
        lock(&self.state.queued_graphql).push_back(response);
    }

    /// Answer generation requests with `status` and `body`.
    pub fn respond_generation(&self, status: StatusCode, body: Value) {
        *lock(&self.state.generation) = FakeResponse {
            status,
            body,
            delay: Duration::ZERO,
        };
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Requests received so far on `path`.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    /// Wait until `count` requests have arrived on `path`.
    ///
    /// # Panics
    ///
    /// Panics if they have not all arrived within five seconds.
    pub async fn wait_for_requests(&self, path: &str, count: usize) {
        let arrived = async {
            while self.requests_to(path).len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        };
        tokio::time::timeout(Duration::from_secs(5), arrived)
            .await
            .expect("requests did not arrive in time");
    }
}

impl Drop for FakeCatalog {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn graphql(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    // Pick the reply before recording, so a recorded request has consumed its
    // queued reply.
    let queued = lock(&state.queued_graphql).pop_front();
    let response = queued.unwrap_or_else(|| lock(&state.graphql).clone());

    lock(&state.requests).push(RecordedRequest {
        path: "/graphql".to_string(),
        query: None,
        body,
    });
    reply(response).await
}

async fn generation(
    State(state): State<Arc<FakeState>>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
) -> Response {
    lock(&state.requests).push(RecordedRequest {
        path: uri.path().to_string(),
        query,
        body: Value::Null,
    });

    let response = lock(&state.generation).clone();
    reply(response).await
}

async fn reply(response: FakeResponse) -> Response {
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }
    (response.status, Json(response.body)).into_response()
}

/// `count` basic product entries.
#[must_use]
pub fn basic_products(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("Product {i}"),
                "sku": format!("SKU-{i:04}"),
                "price": 9.99,
                "stockQuantity": 50
            })
        })
        .collect()
}
