//! Search-as-you-type coordination.
//!
//! At most one catalog request goes out per 300 ms of input inactivity,
//! and a result whose query has since been superseded is discarded
//! rather than delivered. In-flight requests are not aborted; they are
//! simply ignored when they come back stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::SEARCH_DEBOUNCE_MS;
use crate::models::{Source, Track};
use crate::providers::ProviderRegistry;

pub struct SearchSession {
    registry: Arc<ProviderRegistry>,
    latest_ticket: AtomicU64,
}

impl SearchSession {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Submit one keystroke's worth of query. Returns `None` when a
    /// newer submission superseded this one, `Some(results)` otherwise.
    /// An empty query resolves immediately to no results.
    pub async fn submit(&self, source: Source, query: &str, limit: usize) -> Option<Vec<Track>> {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().is_empty() {
            return Some(Vec::new());
        }

        tokio::time::sleep(Duration::from_millis(SEARCH_DEBOUNCE_MS)).await;
        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            log::debug!("[Search] '{}' superseded before dispatch", query);
            return None;
        }

        let results = self.registry.search_with(source, query, limit).await;

        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            log::debug!("[Search] '{}' superseded in flight, discarding", query);
            return None;
        }

        Some(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jiosaavn::JioSaavnProvider;

    async fn session_with_unreachable_provider() -> Arc<SearchSession> {
        let registry = Arc::new(ProviderRegistry::new(Source::Jiosaavn));
        registry
            .register(Arc::new(JioSaavnProvider::with_base_url(
                "http://127.0.0.1:9/api/search/songs".to_string(),
            )))
            .await;
        Arc::new(SearchSession::new(registry))
    }

    #[tokio::test]
    async fn test_empty_query_resolves_to_no_results() {
        let session = session_with_unreachable_provider().await;
        let results = session.submit(Source::Jiosaavn, "  ", 10).await;
        assert_eq!(results, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_superseded_submission_is_discarded() {
        let session = session_with_unreachable_provider().await;

        let older = session.clone();
        let first = tokio::spawn(async move { older.submit(Source::Jiosaavn, "ja", 10).await });

        // Let the first submission enter its debounce window, then type more.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = session.submit(Source::Jiosaavn, "jazz", 10).await;

        assert_eq!(first.await.unwrap(), None);
        // The final query resolves (empty here: the endpoint is unreachable).
        assert_eq!(second, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_failure_yields_empty_results_not_error() {
        let session = session_with_unreachable_provider().await;
        let results = session.submit(Source::Jiosaavn, "jazz", 10).await;
        assert_eq!(results, Some(Vec::new()));
    }
}
