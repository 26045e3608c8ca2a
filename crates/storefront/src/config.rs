//! Explorer configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `EXPLORER_HOST` - Bind address (default: 127.0.0.1)
//! - `EXPLORER_PORT` - Listen port (default: 3000)
//! - `CATALOG_BASE_URL` - Catalog backend base URL (default: <http://localhost:8080>)
//! - `CATALOG_REQUEST_TIMEOUT_SECS` - Request timeout for catalog calls (default: none)
//! - `EXPLORER_PAGE_SIZE` - Products per page (default: 20)
//! - `EXPLORER_SEARCH_DEBOUNCE_MS` - Search input debounce (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use catalog_explorer_core::DEFAULT_PAGE_SIZE;
use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Explorer application configuration.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog backend configuration
    pub catalog: CatalogConfig,
    /// Products requested per page
    pub page_size: NonZeroU32,
    /// Quiet period after the last search keystroke before a load fires
    pub search_debounce: Duration,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Catalog backend configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; always ends with `/` so endpoint paths join beneath it
    pub base_url: Url,
    /// Optional per-request timeout (transport default when unset)
    pub request_timeout: Option<Duration>,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when unset
    pub dsn: Option<String>,
    /// Environment name reported with events
    pub environment: Option<String>,
    /// Fraction of errors sent
    pub sample_rate: f32,
    /// Fraction of transactions sent
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("EXPLORER_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("EXPLORER_PORT", "3000")?;
        let page_size =
            parse_env_or_default::<NonZeroU32>("EXPLORER_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())?;
        let debounce_ms = parse_env_or_default::<u64>(
            "EXPLORER_SEARCH_DEBOUNCE_MS",
            &DEFAULT_SEARCH_DEBOUNCE_MS.to_string(),
        )?;

        Ok(Self {
            host,
            port,
            catalog: CatalogConfig::from_env()?,
            page_size,
            search_debounce: Duration::from_millis(debounce_ms),
            sentry: SentryConfig::from_env()?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    /// Load the catalog section from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL or timeout cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_env_or_default("CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL);
        let base_url = Self::normalize_base_url(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string())
        })?;

        let request_timeout = get_optional_env("CATALOG_REQUEST_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "CATALOG_REQUEST_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            base_url,
            request_timeout,
        })
    }

    /// Parse a base URL, appending a trailing `/` to its path if missing.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed URLs.
    pub fn normalize_base_url(raw: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(raw.trim())?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_env_or_default(
                "SENTRY_SAMPLE_RATE",
                &defaults.sample_rate.to_string(),
            )?,
            traces_sample_rate: parse_env_or_default(
                "SENTRY_TRACES_SAMPLE_RATE",
                &defaults.traces_sample_rate.to_string(),
            )?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to a default literal.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
