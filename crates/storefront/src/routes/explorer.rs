//! Explorer page and results fragment handlers.
//!
//! Every action answers with the results fragment (grid, pagination and
//! metrics) for HTMX to swap into `#results`. Loads that were superseded by a
//! newer one, and debounced search keystrokes, answer `204 No Content` so the
//! newer render stays in place.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use catalog_explorer_core::{
    DEFAULT_BRANDS, DEFAULT_CATEGORIES, DEFAULT_PRODUCTS, QueryVariant, UnknownVariant,
};
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::catalog::CatalogError;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::explorer::generation::CUSTOM_PROGRESS_MESSAGE;
use crate::explorer::{
    GenerationKind, GenerationStatus, LoadOutcome, LoadView, MetricsView, PaginationView,
    SessionSnapshot,
};
use crate::render::NO_PRODUCTS_FRAGMENT;
use crate::state::AppState;

/// Selector HTMX retargets a load error into.
const ERROR_TARGET: &str = "#error-state";

// =============================================================================
// View Types
// =============================================================================

/// Query variant radio option.
#[derive(Debug, Clone)]
pub struct VariantOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

impl VariantOption {
    fn all(selected: QueryVariant) -> Vec<Self> {
        QueryVariant::ALL
            .iter()
            .map(|&variant| Self {
                value: variant.as_str(),
                label: variant.label(),
                checked: variant == selected,
            })
            .collect()
    }
}

/// Results fragment display data.
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub grid_html: String,
    pub pagination: PaginationView,
    /// Hidden until the first successful load.
    pub metrics: Option<MetricsView>,
    pub error: Option<String>,
}

impl ResultsView {
    fn loaded(view: &LoadView) -> Self {
        Self {
            grid_html: view.grid_html.clone(),
            pagination: view.pagination.clone(),
            metrics: Some(view.metrics.clone()),
            error: None,
        }
    }

    /// Results area before anything has loaded.
    fn empty(snapshot: &SessionSnapshot) -> Self {
        Self {
            grid_html: NO_PRODUCTS_FRAGMENT.to_string(),
            pagination: PaginationView::new(snapshot.page_index, snapshot.page_size, 0),
            metrics: None,
            error: None,
        }
    }
}

/// Custom generation prompt defaults.
#[derive(Debug, Clone, Copy)]
pub struct VolumeDefaults {
    pub brands: u32,
    pub categories: u32,
    pub products: u32,
}

impl Default for VolumeDefaults {
    fn default() -> Self {
        Self {
            brands: DEFAULT_BRANDS,
            categories: DEFAULT_CATEGORIES,
            products: DEFAULT_PRODUCTS,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Explorer page template.
#[derive(Template, WebTemplate)]
#[template(path = "explorer/index.html")]
pub struct ExplorerPageTemplate {
    pub variants: Vec<VariantOption>,
    pub search_term: String,
    pub results: ResultsView,
    pub generation_enabled: bool,
    pub fixed_progress: GenerationStatus,
    pub custom_progress: &'static str,
    pub volume_defaults: VolumeDefaults,
}

/// Results fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/results.html")]
pub struct ResultsTemplate {
    pub results: ResultsView,
}

/// Load error fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/load_error.html")]
pub struct LoadErrorTemplate {
    pub message: String,
}

// =============================================================================
// Forms
// =============================================================================

/// Variant selection form data.
#[derive(Debug, Deserialize)]
pub struct VariantForm {
    pub variant: String,
}

/// Search form data.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the explorer page, performing the initial load.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let outcome = state.session().reload().await;
    let snapshot = state.session().snapshot().await;

    let results = match outcome {
        Ok(LoadOutcome::Rendered(view)) => ResultsView::loaded(&view),
        // A newer load from another tab won; the results area refreshes itself.
        Ok(LoadOutcome::Superseded) => ResultsView::empty(&snapshot),
        Err(e) => {
            log_load_error(&e);
            ResultsView {
                error: Some(e.to_string()),
                ..ResultsView::empty(&snapshot)
            }
        }
    };

    ExplorerPageTemplate {
        variants: VariantOption::all(snapshot.variant),
        search_term: snapshot.search_term,
        results,
        generation_enabled: state.generation().is_enabled(),
        fixed_progress: GenerationStatus::progress(&GenerationKind::Fixed),
        custom_progress: CUSTOM_PROGRESS_MESSAGE,
        volume_defaults: VolumeDefaults::default(),
    }
}

/// Reload the current page (HTMX).
#[instrument(skip(state))]
pub async fn products(State(state): State<AppState>) -> Response {
    results_response(state.session().reload().await)
}

/// Switch the query variant (HTMX).
#[instrument(skip(state))]
pub async fn select_variant(
    State(state): State<AppState>,
    Form(form): Form<VariantForm>,
) -> Result<Response> {
    let variant: QueryVariant = form
        .variant
        .parse()
        .map_err(|e: UnknownVariant| AppError::BadRequest(e.to_string()))?;

    add_breadcrumb("explorer", "Variant selected", Some(&[("variant", variant.as_str())]));
    Ok(results_response(state.session().select_variant(variant).await))
}

/// Search by product name (HTMX, debounced).
#[instrument(skip(state))]
pub async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Response {
    if !state.search_debouncer().settle().await {
        debug!("Search input superseded");
        return StatusCode::NO_CONTENT.into_response();
    }

    add_breadcrumb("explorer", "Search", Some(&[("term", form.q.trim())]));
    results_response(state.session().search(&form.q).await)
}

/// Go back one page (HTMX). No-op on the first page.
#[instrument(skip(state))]
pub async fn previous_page(State(state): State<AppState>) -> Response {
    match state.session().previous_page().await {
        Ok(Some(outcome)) => results_response(Ok(outcome)),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => results_response(Err(e)),
    }
}

/// Advance one page (HTMX).
#[instrument(skip(state))]
pub async fn next_page(State(state): State<AppState>) -> Response {
    results_response(state.session().next_page().await)
}

/// Turn a load result into the HTMX response.
///
/// Errors are retargeted into the error panel so the current grid,
/// pagination and metrics stay visible.
fn results_response(result: std::result::Result<LoadOutcome, CatalogError>) -> Response {
    match result {
        Ok(LoadOutcome::Rendered(view)) => ResultsTemplate {
            results: ResultsView::loaded(&view),
        }
        .into_response(),
        Ok(LoadOutcome::Superseded) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            log_load_error(&e);
            (
                AppendHeaders([("HX-Retarget", ERROR_TARGET), ("HX-Reswap", "outerHTML")]),
                LoadErrorTemplate {
                    message: e.to_string(),
                },
            )
                .into_response()
        }
    }
}

fn log_load_error(e: &CatalogError) {
    if e.is_transport() {
        error!(error = %e, "Error loading products");
    } else {
        debug!(error = %e, "Catalog rejected product query");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    #[test]
    fn test_variant_options_mark_selection() {
        let options = VariantOption::all(QueryVariant::WithRelations);
        let checked: Vec<_> = options.iter().filter(|o| o.checked).map(|o| o.value).collect();
        assert_eq!(options.len(), 3);
        assert_eq!(checked, ["withRelations"]);
    }

    #[test]
    fn test_empty_results_hide_metrics() {
        let snapshot = SessionSnapshot {
            page_index: 1,
            page_size: NonZeroU32::new(20).unwrap(),
            variant: QueryVariant::Basic,
            search_term: String::new(),
            last_latency: None,
            requested_fields: Vec::new(),
        };
        let results = ResultsView {
            error: Some("Network error: refused".to_string()),
            ..ResultsView::empty(&snapshot)
        };
        assert!(results.metrics.is_none());
        assert!(results.pagination.previous_enabled);
        assert!(!results.pagination.next_enabled);

        let html = ResultsTemplate { results }.render().unwrap();
        assert!(html.contains("Network error: refused"));
        assert!(html.contains("Page 2"));
    }
}
