//! Per-request pagination and filter parameters.

use std::num::NonZeroU32;

use serde_json::{Map, Value};

use crate::types::query::LookupMode;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Parameters of a single catalog query.
///
/// Built fresh for every request from the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_index: u32,
    /// Number of records requested.
    pub page_size: NonZeroU32,
    /// Name pattern, present only in search mode.
    pub name_pattern: Option<String>,
}

impl PageRequest {
    /// Build a request, deriving the name pattern from a raw search term.
    ///
    /// The term is trimmed; an empty result means a plain listing.
    #[must_use]
    pub fn new(page_index: u32, page_size: NonZeroU32, search_term: &str) -> Self {
        let term = search_term.trim();
        Self {
            page_index,
            page_size,
            name_pattern: (!term.is_empty()).then(|| term.to_string()),
        }
    }

    /// Lookup mode implied by the request.
    #[must_use]
    pub const fn mode(&self) -> LookupMode {
        if self.name_pattern.is_some() {
            LookupMode::Search
        } else {
            LookupMode::Listing
        }
    }

    /// GraphQL variables for the request.
    ///
    /// `namePattern` is only included in search mode.
    #[must_use]
    pub fn variables(&self) -> Value {
        let mut variables = Map::new();
        variables.insert("pageIndex".to_string(), Value::from(self.page_index));
        variables.insert("pageSize".to_string(), Value::from(self.page_size.get()));
        if let Some(pattern) = &self.name_pattern {
            variables.insert("namePattern".to_string(), Value::from(pattern.as_str()));
        }
        Value::Object(variables)
    }
}
