//! Core types for Catalog Explorer.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod id;
pub mod page;
pub mod product;
pub mod query;
pub mod volume;

pub use id::*;
pub use page::{DEFAULT_PAGE_SIZE, PageRequest};
pub use product::{BrandRecord, CategoryRecord, LOW_STOCK_LIMIT, ProductRecord};
pub use query::{LookupMode, QueryVariant, UnknownVariant};
pub use volume::{CustomVolume, DEFAULT_BRANDS, DEFAULT_CATEGORIES, DEFAULT_PRODUCTS, VolumeError};
