//! Catalog API client implementation.
//!
//! Sends the static documents from [`super::queries`] as `{query, variables}`
//! and decodes the reply into the `graphql_client` response envelope.

use std::sync::Arc;
use std::time::{Duration, Instant};

use catalog_explorer_core::CustomVolume;
use graphql_client::Response;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::CatalogError;
use crate::config::CatalogConfig;

/// Shown when the fixed-volume trigger fails without a server message.
pub const FIXED_GENERATION_FALLBACK: &str = "Failed to start data generation";
/// Shown when the custom-volume trigger fails without a server message.
pub const CUSTOM_GENERATION_FALLBACK: &str = "Failed to start custom data generation";

const GRAPHQL_PATH: &str = "graphql";
const GENERATE_FIXED_PATH: &str = "api/data-generation/generate-50k";
const GENERATE_CUSTOM_PATH: &str = "api/data-generation/generate-custom";

/// Readiness probe; every GraphQL server answers it.
const PING_DOCUMENT: &str = "query { __typename }";

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

/// Body returned by the data-generation endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerationResponse {
    message: Option<String>,
    error: Option<String>,
    status: Option<String>,
    note: Option<String>,
}

/// A data-generation job the server accepted.
///
/// The job itself runs asynchronously on the server; acceptance says nothing
/// about its completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationAccepted {
    /// Server status word (e.g. `in_progress`).
    pub status: Option<String>,
    /// Server acknowledgement message.
    pub message: Option<String>,
    /// Extra guidance from the server.
    pub note: Option<String>,
}

/// Result of a timed GraphQL round trip.
///
/// `elapsed` is measured from dispatch to decoded body and is recorded for
/// failures as well as successes.
#[derive(Debug)]
pub struct Execution {
    /// Wall-clock duration of the round trip.
    pub elapsed: Duration,
    /// Decoded `data` object (JSON null when absent), or the failure.
    pub outcome: Result<Value, CatalogError>,
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog GraphQL API and its data-generation endpoints.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    graphql_endpoint: Url,
    generate_fixed_endpoint: Url,
    generate_custom_endpoint: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the endpoints
    /// cannot be derived from the base URL.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: builder.build()?,
                graphql_endpoint: config.base_url.join(GRAPHQL_PATH)?,
                generate_fixed_endpoint: config.base_url.join(GENERATE_FIXED_PATH)?,
                generate_custom_endpoint: config.base_url.join(GENERATE_CUSTOM_PATH)?,
            }),
        })
    }

    /// GraphQL endpoint this client posts to.
    #[must_use]
    pub fn graphql_endpoint(&self) -> &Url {
        &self.inner.graphql_endpoint
    }

    /// Execute a GraphQL document and time the round trip.
    ///
    /// Only the first entry of a non-empty `errors` list is surfaced; the
    /// rest are logged at debug level and dropped.
    #[instrument(skip(self, document, variables), fields(endpoint = %self.inner.graphql_endpoint))]
    pub async fn execute(&self, document: &str, variables: &Value) -> Execution {
        let started = Instant::now();
        let outcome = self.send_query(document, variables).await;
        let elapsed = started.elapsed();

        match &outcome {
            Ok(_) => debug!(elapsed = ?elapsed, "Catalog query succeeded"),
            Err(e) => warn!(
                error = %e,
                elapsed = ?elapsed,
                "Catalog query failed"
            ),
        }

        Execution { elapsed, outcome }
    }

    /// Check that the GraphQL endpoint answers a trivial query.
    ///
    /// # Errors
    ///
    /// Returns the failure of the probe query.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        self.execute(PING_DOCUMENT, &Value::Object(serde_json::Map::new()))
            .await
            .outcome
            .map(drop)
    }

    async fn send_query(&self, document: &str, variables: &Value) -> Result<Value, CatalogError> {
        let response = self
            .inner
            .client
            .post(self.inner.graphql_endpoint.clone())
            .json(&GraphQLRequest {
                query: document,
                variables,
            })
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        let response: Response<Value> = serde_json::from_str(&response_text).map_err(|e| {
            error!(
                error = %e,
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse catalog GraphQL response"
            );
            CatalogError::Decode(e)
        })?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            if errors.len() > 1 {
                debug!(
                    dropped = errors.len() - 1,
                    errors = ?errors,
                    "Surfacing only the first GraphQL error"
                );
            }
            let message = errors
                .into_iter()
                .next()
                .map(|e| e.message)
                .unwrap_or_default();
            return Err(CatalogError::Query(message));
        }

        Ok(response.data.unwrap_or(Value::Null))
    }

    // =========================================================================
    // Data Generation
    // =========================================================================

    /// Start the fixed-volume (50k products) generation job.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Generation` if the server refuses the job, or a
    /// transport error if it cannot be reached.
    #[instrument(skip(self))]
    pub async fn generate_fixed(&self) -> Result<GenerationAccepted, CatalogError> {
        self.trigger_generation(
            self.inner.generate_fixed_endpoint.clone(),
            FIXED_GENERATION_FALLBACK,
        )
        .await
    }

    /// Start a generation job for a custom volume.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Generation` if the server refuses the job, or a
    /// transport error if it cannot be reached.
    #[instrument(skip(self, volume), fields(volume = %volume))]
    pub async fn generate_custom(
        &self,
        volume: &CustomVolume,
    ) -> Result<GenerationAccepted, CatalogError> {
        let mut url = self.inner.generate_custom_endpoint.clone();
        url.query_pairs_mut().extend_pairs(volume.query_pairs());
        self.trigger_generation(url, CUSTOM_GENERATION_FALLBACK).await
    }

    async fn trigger_generation(
        &self,
        url: Url,
        fallback: &str,
    ) -> Result<GenerationAccepted, CatalogError> {
        let response = self
            .inner
            .client
            .post(url)
            // The endpoint consumes JSON even though no body is sent
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        let body: GenerationResponse = serde_json::from_str(&response_text).unwrap_or_else(|e| {
            debug!(error = %e, status = %status, "Generation response is not JSON");
            GenerationResponse::default()
        });

        if !status.is_success() {
            let message = body
                .message
                .or(body.error)
                .unwrap_or_else(|| fallback.to_string());
            warn!(status = %status, message = %message, "Data generation refused");
            return Err(CatalogError::Generation(message));
        }

        info!(status = ?body.status, "Data generation accepted");
        Ok(GenerationAccepted {
            status: body.status,
            message: body.message,
            note: body.note,
        })
    }
}
