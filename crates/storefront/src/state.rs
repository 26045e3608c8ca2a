//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::ExplorerConfig;
use crate::explorer::{Debouncer, ExplorerSession, GenerationControls};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds the single explorer
/// session, so every browser tab sees the same page, variant and search term.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ExplorerConfig,
    session: ExplorerSession,
    search_debouncer: Debouncer,
    generation: GenerationControls,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be built.
    pub fn new(config: ExplorerConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let session = ExplorerSession::new(catalog, config.page_size);
        let search_debouncer = Debouncer::new(config.search_debounce);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                session,
                search_debouncer,
                generation: GenerationControls::new(),
            }),
        })
    }

    /// Get a reference to the explorer configuration.
    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        self.inner.session.catalog()
    }

    /// Get a reference to the explorer session.
    #[must_use]
    pub fn session(&self) -> &ExplorerSession {
        &self.inner.session
    }

    /// Get a reference to the search input debouncer.
    #[must_use]
    pub fn search_debouncer(&self) -> &Debouncer {
        &self.inner.search_debouncer
    }

    /// Get a reference to the generation controls.
    #[must_use]
    pub fn generation(&self) -> &GenerationControls {
        &self.inner.generation
    }
}
