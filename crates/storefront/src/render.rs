//! Product grid rendering.
//!
//! Turns the raw product entries selected from a GraphQL response into an
//! HTML fragment. Entries are decoded leniently: any field may be missing
//! depending on the query variant. Rendering never fails from the caller's
//! point of view; problems are logged and replaced with a generic fragment.

use askama::Template;
use catalog_explorer_core::ProductRecord;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

/// Fragment shown when a load returns no products.
pub const NO_PRODUCTS_FRAGMENT: &str = r#"<div class="no-products">No products found</div>"#;

/// Text shown in place of products that cannot be displayed.
pub const RENDER_ERROR_MESSAGE: &str = "Error displaying products. Please try again.";

/// Fragment shown when the grid cannot be rendered.
pub const RENDER_ERROR_FRAGMENT: &str =
    r#"<div class="error-message">Error displaying products. Please try again.</div>"#;

/// Characters of description shown on a card.
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Error)]
enum RenderError {
    #[error("malformed product entry: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Card display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub name: String,
    pub sku: Option<String>,
    pub price: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub stock: Option<i64>,
    pub low_stock: bool,
}

impl From<&ProductRecord> for ProductCardView {
    fn from(product: &ProductRecord) -> Self {
        Self {
            name: product
                .name
                .clone()
                .unwrap_or_else(|| "Unknown Product".to_string()),
            sku: product.sku.clone(),
            price: format_price(product.price),
            brand: product.brand.as_ref().map(|brand| {
                brand.name.clone().unwrap_or_else(|| "Unknown".to_string())
            }),
            category: product.category.as_ref().map(|category| {
                category
                    .name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string())
            }),
            description: product.description.as_deref().map(preview_description),
            stock: product.stock_quantity,
            low_stock: product.is_low_stock(),
        }
    }
}

/// Product grid fragment template.
#[derive(Template)]
#[template(path = "partials/product_grid.html")]
struct ProductGridTemplate<'a> {
    cards: &'a [ProductCardView],
}

/// Render product entries as a grid fragment.
///
/// - an empty list renders [`NO_PRODUCTS_FRAGMENT`]
/// - `null` entries are skipped
/// - any entry that does not decode as a product, or a template failure,
///   renders [`RENDER_ERROR_FRAGMENT`] for the whole grid
#[must_use]
pub fn render_grid(entries: &[Value]) -> String {
    if entries.is_empty() {
        return NO_PRODUCTS_FRAGMENT.to_string();
    }

    try_render_grid(entries).unwrap_or_else(|e| {
        error!(error = %e, entries = entries.len(), "Failed to render product grid");
        RENDER_ERROR_FRAGMENT.to_string()
    })
}

fn try_render_grid(entries: &[Value]) -> Result<String, RenderError> {
    let cards = product_cards(entries)?;
    Ok(ProductGridTemplate { cards: &cards }.render()?)
}

/// Decode product entries into card views, skipping `null` entries.
///
/// # Errors
///
/// Returns the decode error of the first entry that is not a product object.
pub fn product_cards(entries: &[Value]) -> Result<Vec<ProductCardView>, serde_json::Error> {
    entries
        .iter()
        .filter(|entry| !entry.is_null())
        .map(|entry| ProductRecord::deserialize(entry).map(|record| ProductCardView::from(&record)))
        .collect()
}

/// Format a price for display; missing prices show as zero.
fn format_price(price: Option<Decimal>) -> String {
    let amount = price
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${amount:.2}")
}

/// First characters of a description followed by an ellipsis marker.
fn preview_description(description: &str) -> String {
    let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{preview}...")
}
