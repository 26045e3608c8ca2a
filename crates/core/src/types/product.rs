//! Product records as returned by the catalog GraphQL API.
//!
//! Every field is optional: which ones arrive depends on the query variant
//! that produced the record, so absence is normal rather than an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{BrandId, CategoryId, ProductId};

/// Stock at or below this quantity is flagged as low.
pub const LOW_STOCK_LIMIT: i64 = 10;

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub slug: Option<String>,
    pub price: Option<Decimal>,
    pub compare_at_price: Option<Decimal>,
    pub stock_quantity: Option<i64>,
    pub low_stock_threshold: Option<i64>,
    pub weight: Option<Decimal>,
    pub weight_unit: Option<String>,
    pub active: Option<bool>,
    pub featured: Option<bool>,
    pub track_inventory: Option<bool>,
    pub image_urls: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    /// ISO-8601 timestamp as sent by the server.
    pub created_at: Option<String>,
    /// ISO-8601 timestamp as sent by the server.
    pub updated_at: Option<String>,
    pub brand: Option<BrandRecord>,
    pub category: Option<CategoryRecord>,
}

impl ProductRecord {
    /// Whether the product has a known stock quantity at or below [`LOW_STOCK_LIMIT`].
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity
            .is_some_and(|quantity| quantity <= LOW_STOCK_LIMIT)
    }
}

/// A product brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandRecord {
    pub id: Option<BrandId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub active: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A product category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryRecord {
    pub id: Option<CategoryId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
    pub sort_order: Option<i32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
