//! Catalog backend client: GraphQL product queries and data-generation triggers.
//!
//! # Architecture
//!
//! - Six static GraphQL documents (three field-depth variants × listing/search)
//! - `graphql_client` response envelope, HTTP via `reqwest` 0.13
//! - No caching, no retries: every load is a single round trip
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_explorer_core::{PageRequest, QueryVariant};
//! use catalog_explorer_storefront::catalog::{self, CatalogClient};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let request = PageRequest::new(0, page_size, "");
//! let document = catalog::queries::document(request.mode(), QueryVariant::Basic);
//!
//! let execution = client.execute(document, &request.variables()).await;
//! let data = execution.outcome?;
//! let products = catalog::selector::select_products(&data, request.mode(), QueryVariant::Basic);
//! ```

pub mod client;
pub mod fields;
pub mod queries;
pub mod selector;

pub use client::{CatalogClient, Execution, GenerationAccepted};

use thiserror::Error;

/// Errors that can occur when talking to the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The GraphQL response carried an errors list; holds the first message.
    #[error("{0}")]
    Query(String),

    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("Invalid response from catalog service: {0}")]
    Decode(#[from] serde_json::Error),

    /// A data-generation trigger was refused by the server.
    #[error("{0}")]
    Generation(String),

    /// The configured endpoint could not be turned into a request URL.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

impl CatalogError {
    /// Whether the failure happened below the GraphQL layer (network or decoding).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}
