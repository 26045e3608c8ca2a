//! Pagination affordances and the metrics panel.

use std::num::NonZeroU32;
use std::time::Duration;

/// Navigation state after a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// Zero-based index of the page that was loaded.
    pub page_index: u32,
    /// Whether "previous" is available (not on the first page).
    pub previous_enabled: bool,
    /// Whether "next" is available.
    ///
    /// A short page is taken to be the last one; this assumes the server
    /// always fills a page unless it has run out of records.
    pub next_enabled: bool,
}

impl PaginationView {
    /// Derive navigation state from the page that was requested and how many
    /// records came back.
    #[must_use]
    pub fn new(page_index: u32, page_size: NonZeroU32, returned: usize) -> Self {
        let page_size = usize::try_from(page_size.get()).unwrap_or(usize::MAX);
        Self {
            page_index,
            previous_enabled: page_index > 0,
            next_enabled: returned >= page_size,
        }
    }

    /// One-based page label, e.g. `Page 1`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {}", u64::from(self.page_index) + 1)
    }
}

/// Figures shown in the metrics panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsView {
    /// Round-trip latency in whole milliseconds.
    pub query_time_ms: u64,
    /// Fields the document requested.
    pub fields_requested: Vec<&'static str>,
    /// Number of records in the response.
    pub records_returned: usize,
}

impl MetricsView {
    /// Build the metrics for a completed load.
    #[must_use]
    pub fn new(latency: Duration, fields_requested: Vec<&'static str>, records_returned: usize) -> Self {
        Self {
            query_time_ms: round_millis(latency),
            fields_requested,
            records_returned,
        }
    }

    /// Latency formatted for display, e.g. `42ms`.
    #[must_use]
    pub fn query_time(&self) -> String {
        format!("{}ms", self.query_time_ms)
    }

    /// Requested fields joined for display.
    #[must_use]
    pub fn fields(&self) -> String {
        self.fields_requested.join(", ")
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // non-negative, far below u64::MAX
fn round_millis(duration: Duration) -> u64 {
    (duration.as_secs_f64() * 1000.0).round() as u64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn size(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_full_page_enables_next() {
        let view = PaginationView::new(0, size(20), 20);
        assert!(view.next_enabled);
        assert!(!view.previous_enabled);
    }

    #[test]
    fn test_short_page_disables_next() {
        let view = PaginationView::new(2, size(20), 19);
        assert!(!view.next_enabled);
        assert!(view.previous_enabled);
    }

    #[test]
    fn test_empty_page_disables_next() {
        assert!(!PaginationView::new(0, size(20), 0).next_enabled);
    }

    #[test]
    fn test_label_is_one_based() {
        assert_eq!(PaginationView::new(0, size(20), 0).label(), "Page 1");
        assert_eq!(PaginationView::new(4, size(20), 0).label(), "Page 5");
    }

    #[test]
    fn test_metrics_display() {
        let metrics = MetricsView::new(
            Duration::from_micros(41_600),
            vec!["id", "name", "sku"],
            3,
        );
        assert_eq!(metrics.query_time(), "42ms");
        assert_eq!(metrics.fields(), "id, name, sku");
        assert_eq!(metrics.records_returned, 3);
    }
}
