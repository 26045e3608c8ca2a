//! CLI command implementations.

pub mod generate;
pub mod products;

use catalog_explorer_core::VolumeError;
use catalog_explorer_storefront::catalog::CatalogError;
use catalog_explorer_storefront::config::{CatalogConfig, ConfigError, ExplorerConfig};
use thiserror::Error;

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid --catalog-url: {0}")]
    CatalogUrl(#[from] url::ParseError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Volume(#[from] VolumeError),

    #[error("--page-size must be greater than zero")]
    ZeroPageSize,

    #[error("{0}")]
    Generation(String),

    #[error("failed to read answer: {0}")]
    Io(#[from] std::io::Error),
}

/// Load configuration from the environment, applying `--catalog-url`.
fn load_config(catalog_url: Option<&str>) -> Result<ExplorerConfig, CommandError> {
    let mut config = ExplorerConfig::from_env()?;
    if let Some(url) = catalog_url {
        config.catalog.base_url = CatalogConfig::normalize_base_url(url)?;
    }
    Ok(config)
}
