use crate::error::FeedError;
use crate::transport::{FeedTransport, HttpFeedTransport};
use crate::wire::normalize_entry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use watchlist_sync_config::FeedConfig;
use watchlist_sync_models::WatchlistItem;

/// Upper bound on pages followed per fetch. The feed terminates pagination
/// itself; the cap only guards against a feed that never stops pointing at
/// a next page.
pub const DEFAULT_PAGE_CAP: usize = 50;

/// What the sync engine needs from a watchlist feed.
#[async_trait]
pub trait WatchlistFeed: Send + Sync {
    /// Cheap probe for the feed's current cache-validation token.
    async fn probe(&self, url: &str) -> Result<Option<String>, FeedError>;

    /// Retrieve the whole feed, following pagination, normalized into
    /// canonical items in page order.
    async fn fetch(&self, url: &str) -> Result<Vec<WatchlistItem>, FeedError>;
}

pub struct WatchlistFeedClient {
    transport: Arc<dyn FeedTransport>,
    page_cap: usize,
}

impl WatchlistFeedClient {
    pub fn new(transport: Arc<dyn FeedTransport>) -> Self {
        Self {
            transport,
            page_cap: DEFAULT_PAGE_CAP,
        }
    }

    /// HTTP-backed client with the configured timeout, retry floor and
    /// page cap.
    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        let transport = HttpFeedTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport)).with_page_cap(config.page_cap))
    }

    pub fn with_page_cap(mut self, page_cap: usize) -> Self {
        self.page_cap = page_cap.max(1);
        self
    }
}

#[async_trait]
impl WatchlistFeed for WatchlistFeedClient {
    async fn probe(&self, url: &str) -> Result<Option<String>, FeedError> {
        self.transport.probe(url).await
    }

    async fn fetch(&self, url: &str) -> Result<Vec<WatchlistItem>, FeedError> {
        let mut items = Vec::new();
        let mut pages_fetched = 0;
        let mut next_url = Some(url.to_string());

        while let Some(page_url) = next_url {
            if pages_fetched >= self.page_cap {
                warn!(
                    url = %url,
                    page_cap = self.page_cap,
                    "Feed pagination cap reached, truncating fetch"
                );
                break;
            }

            let page = self.transport.get_page(&page_url).await?;
            pages_fetched += 1;
            items.extend(page.items.iter().filter_map(normalize_entry));
            next_url = page.links.next;
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{FeedEntry, FeedLinks, FeedPage};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedTransport {
        pages: Mutex<HashMap<String, FeedPage>>,
        etag: Option<String>,
        probe_calls: AtomicUsize,
        page_calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(pages: Vec<(&str, FeedPage)>) -> Self {
            Self {
                pages: Mutex::new(
                    pages
                        .into_iter()
                        .map(|(url, page)| (url.to_string(), page))
                        .collect(),
                ),
                etag: Some("\"abc123\"".to_string()),
                probe_calls: AtomicUsize::new(0),
                page_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FeedTransport for ScriptedTransport {
        async fn probe(&self, _url: &str) -> Result<Option<String>, FeedError> {
            self.probe_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.etag.clone())
        }

        async fn get_page(&self, url: &str) -> Result<FeedPage, FeedError> {
            self.page_calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .lock()
                .unwrap()
                .remove(url)
                .ok_or_else(|| FeedError::Status(reqwest::StatusCode::NOT_FOUND))
        }
    }

    fn movie_entry(title: &str, tmdb_id: u32) -> FeedEntry {
        FeedEntry {
            guid: format!("feed://{}", tmdb_id),
            title: title.to_string(),
            category: "movie".to_string(),
            guids: vec![format!("tmdb://{}", tmdb_id)],
        }
    }

    fn page(entries: Vec<FeedEntry>, next: Option<&str>) -> FeedPage {
        FeedPage {
            items: entries,
            links: FeedLinks {
                next: next.map(|n| n.to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_fetch_follows_pagination_in_order() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            (
                "https://feed.test/watchlist",
                page(
                    vec![movie_entry("First", 1), movie_entry("Second", 2)],
                    Some("https://feed.test/watchlist?page=2"),
                ),
            ),
            (
                "https://feed.test/watchlist?page=2",
                page(vec![movie_entry("Third", 3)], None),
            ),
        ]));
        let client = WatchlistFeedClient::new(transport.clone());

        let items = client.fetch("https://feed.test/watchlist").await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items.iter().map(|i| i.tmdb_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(transport.page_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_honors_page_cap() {
        // Every page points back at itself, so only the cap can stop us
        let looping = page(
            vec![movie_entry("Loop", 9)],
            Some("https://feed.test/watchlist"),
        );
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        transport
            .pages
            .lock()
            .unwrap()
            .insert("https://feed.test/watchlist".to_string(), looping);

        let client = WatchlistFeedClient::new(transport.clone()).with_page_cap(1);
        let items = client.fetch("https://feed.test/watchlist").await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(transport.page_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_propagates_mid_pagination_failure() {
        let transport = Arc::new(ScriptedTransport::new(vec![(
            "https://feed.test/watchlist",
            page(
                vec![movie_entry("First", 1)],
                Some("https://feed.test/watchlist?page=2"),
            ),
        )]));
        let client = WatchlistFeedClient::new(transport);

        assert!(client.fetch("https://feed.test/watchlist").await.is_err());
    }

    #[tokio::test]
    async fn test_probe_returns_transport_etag() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let client = WatchlistFeedClient::new(transport.clone());

        let etag = client.probe("https://feed.test/watchlist").await.unwrap();
        assert_eq!(etag.as_deref(), Some("\"abc123\""));
        assert_eq!(transport.probe_calls.load(Ordering::SeqCst), 1);
    }
}
