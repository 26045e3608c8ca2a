//! Load one page of products and print it.

use std::num::NonZeroU32;

use catalog_explorer_core::QueryVariant;
use catalog_explorer_storefront::catalog::CatalogClient;
use catalog_explorer_storefront::explorer::{ExplorerSession, LoadOutcome, LoadView};
use catalog_explorer_storefront::render::{self, ProductCardView};
use tracing::{error, info, warn};

use super::{CommandError, load_config};

/// Page to load.
#[derive(Debug, Clone)]
pub struct Selection {
    pub variant: QueryVariant,
    pub search: String,
    pub page_index: u32,
    pub page_size: Option<u32>,
}

/// Load the selected page and print cards, pagination and metrics.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the catalog query fails.
pub async fn show(catalog_url: Option<&str>, selection: Selection) -> Result<(), CommandError> {
    let config = load_config(catalog_url)?;
    let page_size = match selection.page_size {
        Some(size) => NonZeroU32::new(size).ok_or(CommandError::ZeroPageSize)?,
        None => config.page_size,
    };

    let catalog = CatalogClient::new(&config.catalog)?;
    info!(endpoint = %catalog.graphql_endpoint(), "Querying catalog");

    let session = ExplorerSession::new(catalog, page_size).with_selection(
        selection.variant,
        &selection.search,
        selection.page_index,
    );

    match session.reload().await? {
        LoadOutcome::Rendered(view) => print_page(&view),
        // Only one load is ever issued here.
        LoadOutcome::Superseded => warn!("Load superseded"),
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_page(view: &LoadView) {
    for line in page_lines(view) {
        println!("{line}");
    }
}

/// Output for a loaded page: cards, then pagination and metrics.
///
/// A malformed product entry replaces the cards with a generic message; the
/// pagination and metrics are printed regardless.
fn page_lines(view: &LoadView) -> Vec<String> {
    let mut lines = match render::product_cards(&view.products) {
        Ok(cards) if cards.is_empty() => vec!["No products found".to_string()],
        Ok(cards) => cards
            .iter()
            .map(|card| card_lines(card).join("\n  "))
            .collect(),
        Err(e) => {
            error!(error = %e, entries = view.products.len(), "Failed to display products");
            vec![render::RENDER_ERROR_MESSAGE.to_string()]
        }
    };

    let pagination = &view.pagination;
    lines.push(String::new());
    lines.push(format!(
        "{}  (previous: {}, next: {})",
        pagination.label(),
        availability(pagination.previous_enabled),
        availability(pagination.next_enabled),
    ));
    lines.push(format!("Query Time:       {}", view.metrics.query_time()));
    lines.push(format!("Fields Requested: {}", view.metrics.fields()));
    lines.push(format!("Records Returned: {}", view.metrics.records_returned));
    lines
}

/// Card as indented text lines, in the same order as the grid.
fn card_lines(card: &ProductCardView) -> Vec<String> {
    let mut lines = vec![format!("{}  {}", card.name, card.price)];
    if let Some(sku) = &card.sku {
        lines.push(format!("SKU: {sku}"));
    }
    if let Some(brand) = &card.brand {
        lines.push(format!("Brand: {brand}"));
    }
    if let Some(category) = &card.category {
        lines.push(format!("Category: {category}"));
    }
    if let Some(description) = &card.description {
        lines.push(description.clone());
    }
    if let Some(stock) = card.stock {
        let marker = if card.low_stock { " (low stock)" } else { "" };
        lines.push(format!("Stock: {stock}{marker}"));
    }
    lines
}

const fn availability(enabled: bool) -> &'static str {
    if enabled { "available" } else { "none" }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use catalog_explorer_core::PageRequest;
    use catalog_explorer_storefront::explorer::{MetricsView, PaginationView};
    use serde_json::{Value, json};

    use super::*;

    fn view(products: Vec<Value>) -> LoadView {
        let page_size = NonZeroU32::MIN.saturating_add(19);
        let records = products.len();
        LoadView {
            request: PageRequest::new(0, page_size, ""),
            variant: QueryVariant::Basic,
            grid_html: render::render_grid(&products),
            products,
            pagination: PaginationView::new(0, page_size, records),
            metrics: MetricsView::new(
                Duration::from_millis(12),
                vec!["id", "name", "sku", "price", "stockQuantity"],
                records,
            ),
        }
    }

    #[test]
    fn test_malformed_entry_prints_error_and_metrics() {
        let lines = page_lines(&view(vec![
            json!({"name": "Fine"}),
            json!({"description": 42}),
        ]));
        assert_eq!(
            lines,
            [
                "Error displaying products. Please try again.",
                "",
                "Page 1  (previous: none, next: none)",
                "Query Time:       12ms",
                "Fields Requested: id, name, sku, price, stockQuantity",
                "Records Returned: 2",
            ]
        );
    }

    #[test]
    fn test_empty_page_prints_no_products() {
        let lines = page_lines(&view(Vec::new()));
        assert_eq!(lines.first().map(String::as_str), Some("No products found"));
        assert_eq!(lines.last().map(String::as_str), Some("Records Returned: 0"));
    }

    #[test]
    fn test_card_lines_skip_missing_fields() {
        let card = ProductCardView {
            name: "Desk Lamp".to_string(),
            sku: Some("LAMP-1".to_string()),
            price: "$19.99".to_string(),
            brand: None,
            category: Some("Lighting".to_string()),
            description: None,
            stock: Some(4),
            low_stock: true,
        };
        assert_eq!(
            card_lines(&card),
            [
                "Desk Lamp  $19.99",
                "SKU: LAMP-1",
                "Category: Lighting",
                "Stock: 4 (low stock)",
            ]
        );
    }
}
