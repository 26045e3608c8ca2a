//! Catalog Explorer Core - Shared types library.
//!
//! This crate provides common types used across all Catalog Explorer components:
//! - `storefront` - Server-rendered explorer UI over the catalog GraphQL API
//! - `cli` - Command-line client for listing products and triggering data generation
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Query selectors, page requests, product records and generation volumes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
