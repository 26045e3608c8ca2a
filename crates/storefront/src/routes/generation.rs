//! Data-generation trigger handlers.
//!
//! Both triggers answer with the generation status fragment. The page marks
//! both buttons disabled while a trigger request is in flight
//! (`hx-disabled-elt`); the server rejects overlapping triggers regardless.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_explorer_core::CustomVolume;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::add_breadcrumb;
use crate::explorer::generation::{self, GenerationKind, GenerationStatus};
use crate::state::AppState;

/// Generation status fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/generation_status.html")]
pub struct GenerationStatusTemplate {
    pub status: GenerationStatus,
}

/// Custom generation form data.
///
/// Counts arrive as raw text so that an empty field can be told apart from an
/// invalid one.
#[derive(Debug, Default, Deserialize)]
pub struct CustomGenerationForm {
    pub brands: Option<String>,
    pub categories: Option<String>,
    pub products: Option<String>,
}

/// Start fixed-volume generation (HTMX).
#[instrument(skip(state))]
pub async fn fixed(State(state): State<AppState>) -> impl IntoResponse {
    add_breadcrumb("generation", "Fixed generation requested", None);
    let status = generation::trigger(state.catalog(), state.generation(), GenerationKind::Fixed).await;
    GenerationStatusTemplate { status }
}

/// Start custom-volume generation (HTMX).
///
/// A missing or empty count cancels without contacting the catalog.
#[instrument(skip(state))]
pub async fn custom(
    State(state): State<AppState>,
    Form(form): Form<CustomGenerationForm>,
) -> Response {
    let volume = match CustomVolume::from_prompts(
        form.brands.as_deref(),
        form.categories.as_deref(),
        form.products.as_deref(),
    ) {
        Ok(Some(volume)) => volume,
        Ok(None) => {
            info!("Custom generation cancelled");
            return StatusCode::NO_CONTENT.into_response();
        }
        Err(e) => {
            warn!(error = %e, "Rejected custom generation volume");
            return GenerationStatusTemplate {
                status: GenerationStatus::error(&e.to_string()),
            }
            .into_response();
        }
    };

    let volume_label = volume.to_string();
    add_breadcrumb(
        "generation",
        "Custom generation requested",
        Some(&[("volume", volume_label.as_str())]),
    );

    let status = generation::trigger(
        state.catalog(),
        state.generation(),
        GenerationKind::Custom(volume),
    )
    .await;
    GenerationStatusTemplate { status }.into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_success_fragment_schedules_reload() {
        let html = GenerationStatusTemplate {
            status: GenerationStatus::success(&GenerationKind::Fixed),
        }
        .render()
        .unwrap();
        assert!(html.contains("Data generation started!"));
        assert!(html.contains("generation-status success"));
        assert!(html.contains("load delay:5000ms"));
    }

    #[test]
    fn test_error_fragment_has_no_reload() {
        let status = GenerationStatus::error("Failed to start data generation");
        assert_eq!(status.reload_after, None::<Duration>);

        let html = GenerationStatusTemplate { status }.render().unwrap();
        assert!(html.contains("Error: Failed to start data generation"));
        assert!(!html.contains("hx-trigger"));
    }
}
