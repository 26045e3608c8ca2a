//! Trailing-edge debounce for search input.
//!
//! Every keystroke submits to the debouncer and waits out the quiet period.
//! A newer submission supersedes any pending one, so only the last
//! submission in a pause settles and goes on to load products.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Debouncer keyed by a monotonically increasing submission counter.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: AtomicU64::new(0),
        }
    }

    /// Quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Submit an input and wait out the quiet period.
    ///
    /// Returns `true` if no newer submission arrived in the meantime, i.e.
    /// this caller should act. Superseded callers get `false`.
    pub async fn settle(&self) -> bool {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_single_submission_settles() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        assert!(debouncer.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_submission_supersedes_pending() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(300)));

        let first = tokio::spawn({
            let debouncer = Arc::clone(&debouncer);
            async move { debouncer.settle().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = tokio::spawn({
            let debouncer = Arc::clone(&debouncer);
            async move { debouncer.settle().await }
        });

        assert!(!first.await.expect("first task panicked"));
        assert!(second.await.expect("second task panicked"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submissions_after_pause_both_settle() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        assert!(debouncer.settle().await);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(debouncer.settle().await);
    }
}
