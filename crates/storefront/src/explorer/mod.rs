//! Explorer session: the state behind the product explorer and its load cycle.
//!
//! # Load Cycle
//!
//! ```text
//! action (variant / search / page / reload)
//!   -> query catalog (document for mode x variant)
//!   -> executor (timed POST /graphql)
//!   -> response selector (root field for mode x variant)
//!   -> field extractor (metrics)
//!   -> renderer (grid fragment)
//!   -> pagination + metrics
//! ```
//!
//! # Ordering
//!
//! Loads may overlap (rapid variant toggling, several tabs). Each load takes a
//! ticket when it is dispatched; when its response arrives, a ticket older than
//! the latest one issued is discarded as [`LoadOutcome::Superseded`] so a slow
//! stale response cannot overwrite newer state.

pub mod debounce;
pub mod generation;
pub mod pagination;

use std::num::NonZeroU32;
use std::time::Duration;

use catalog_explorer_core::{LookupMode, PageRequest, QueryVariant};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::catalog::{CatalogClient, CatalogError, fields, queries, selector};
use crate::render;

pub use debounce::Debouncer;
pub use generation::{GenerationControls, GenerationKind, GenerationStatus};
pub use pagination::{MetricsView, PaginationView};

/// Mutable session state. Never held across network I/O.
#[derive(Debug, Default)]
struct SessionState {
    page_index: u32,
    variant: QueryVariant,
    search_term: String,
    last_latency: Option<Duration>,
    requested_fields: Vec<&'static str>,
    /// Ticket of the most recently dispatched load.
    latest_ticket: u64,
}

/// Read-only copy of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub page_index: u32,
    pub page_size: NonZeroU32,
    pub variant: QueryVariant,
    pub search_term: String,
    pub last_latency: Option<Duration>,
    pub requested_fields: Vec<&'static str>,
}

/// Everything the UI needs after a successful load.
#[derive(Debug, Clone)]
pub struct LoadView {
    /// Parameters the load was issued with.
    pub request: PageRequest,
    /// Variant the load was issued with.
    pub variant: QueryVariant,
    /// Product entries as selected from the response.
    pub products: Vec<Value>,
    /// Rendered product grid fragment.
    pub grid_html: String,
    pub pagination: PaginationView,
    pub metrics: MetricsView,
}

/// Result of a load that reached the catalog.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The response belongs to the latest load and was rendered.
    Rendered(Box<LoadView>),
    /// A newer load was dispatched while this one was in flight.
    Superseded,
}

/// The explorer's session: page, variant and search selections plus the
/// load cycle that acts on them.
///
/// Created once at startup and mutated only through its action methods.
pub struct ExplorerSession {
    catalog: CatalogClient,
    page_size: NonZeroU32,
    state: Mutex<SessionState>,
}

impl ExplorerSession {
    /// Create a session on the first page, basic variant, no search term.
    #[must_use]
    pub fn new(catalog: CatalogClient, page_size: NonZeroU32) -> Self {
        Self {
            catalog,
            page_size,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Start from the given selections instead of the first listing page.
    #[must_use]
    pub fn with_selection(self, variant: QueryVariant, search_term: &str, page_index: u32) -> Self {
        let state = SessionState {
            page_index,
            variant,
            search_term: search_term.trim().to_owned(),
            ..SessionState::default()
        };
        Self {
            state: Mutex::new(state),
            ..self
        }
    }

    /// Catalog client used for loads.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Current state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            page_index: state.page_index,
            page_size: self.page_size,
            variant: state.variant,
            search_term: state.search_term.clone(),
            last_latency: state.last_latency,
            requested_fields: state.requested_fields.clone(),
        }
    }

    /// Reload the current page with the current selections.
    ///
    /// # Errors
    ///
    /// Returns the catalog failure of this load.
    pub async fn reload(&self) -> Result<LoadOutcome, CatalogError> {
        self.load().await
    }

    /// Switch the query variant and go back to the first page.
    ///
    /// # Errors
    ///
    /// Returns the catalog failure of the resulting load.
    pub async fn select_variant(
        &self,
        variant: QueryVariant,
    ) -> Result<LoadOutcome, CatalogError> {
        {
            let mut state = self.state.lock().await;
            state.variant = variant;
            state.page_index = 0;
        }
        self.load().await
    }

    /// Set the search term (trimmed) and go back to the first page.
    ///
    /// # Errors
    ///
    /// Returns the catalog failure of the resulting load.
    pub async fn search(&self, term: &str) -> Result<LoadOutcome, CatalogError> {
        {
            let mut state = self.state.lock().await;
            term.trim().clone_into(&mut state.search_term);
            state.page_index = 0;
        }
        self.load().await
    }

    /// Advance one page.
    ///
    /// # Errors
    ///
    /// Returns the catalog failure of the resulting load.
    pub async fn next_page(&self) -> Result<LoadOutcome, CatalogError> {
        {
            let mut state = self.state.lock().await;
            state.page_index = state.page_index.saturating_add(1);
        }
        self.load().await
    }

    /// Go back one page. Returns `None` without loading when already on the
    /// first page.
    ///
    /// # Errors
    ///
    /// Returns the catalog failure of the resulting load.
    pub async fn previous_page(&self) -> Result<Option<LoadOutcome>, CatalogError> {
        {
            let mut state = self.state.lock().await;
            if state.page_index == 0 {
                return Ok(None);
            }
            state.page_index -= 1;
        }
        self.load().await.map(Some)
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<LoadOutcome, CatalogError> {
        let (ticket, request, variant) = {
            let mut state = self.state.lock().await;
            state.latest_ticket += 1;
            let request = PageRequest::new(state.page_index, self.page_size, &state.search_term);
            state.requested_fields =
                fields::extract_fields(queries::document(request.mode(), state.variant));
            (state.latest_ticket, request, state.variant)
        };

        let mode = request.mode();
        let document = queries::document(mode, variant);
        let execution = self.catalog.execute(document, &request.variables()).await;

        let requested_fields = {
            let mut state = self.state.lock().await;
            if ticket != state.latest_ticket {
                debug!(ticket, latest = state.latest_ticket, "Discarding superseded load");
                return Ok(LoadOutcome::Superseded);
            }
            state.last_latency = Some(execution.elapsed);
            state.requested_fields.clone()
        };

        let data = execution.outcome?;
        let view = build_view(
            request,
            variant,
            mode,
            &data,
            execution.elapsed,
            requested_fields,
            self.page_size,
        );

        info!(
            ticket,
            mode = %mode,
            variant = %variant,
            page_index = view.request.page_index,
            records = view.metrics.records_returned,
            "Products loaded"
        );
        Ok(LoadOutcome::Rendered(Box::new(view)))
    }
}

fn build_view(
    request: PageRequest,
    variant: QueryVariant,
    mode: LookupMode,
    data: &Value,
    latency: Duration,
    requested_fields: Vec<&'static str>,
    page_size: NonZeroU32,
) -> LoadView {
    let products = selector::select_products(data, mode, variant);
    let records = products.len();

    LoadView {
        pagination: PaginationView::new(request.page_index, page_size, records),
        metrics: MetricsView::new(latency, requested_fields, records),
        grid_html: render::render_grid(&products),
        products,
        request,
        variant,
    }
}
