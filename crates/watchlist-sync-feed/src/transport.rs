use crate::error::FeedError;
use crate::wire::FeedPage;
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;
use tracing::debug;
use watchlist_sync_config::FeedConfig;

/// Raw access to the feed host: a metadata-only probe and single-page GETs.
/// Pagination and normalization live above this seam so they can be tested
/// against a scripted transport.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// HEAD the feed and return its current cache-validation token, if the
    /// host sends one. No body transfer.
    async fn probe(&self, url: &str) -> Result<Option<String>, FeedError>;

    /// GET and decode one page of the feed.
    async fn get_page(&self, url: &str) -> Result<FeedPage, FeedError>;
}

pub struct HttpFeedTransport {
    client: reqwest::Client,
    retry_floor: Duration,
}

impl HttpFeedTransport {
    pub fn new(request_timeout: Duration, retry_floor: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::ACCEPT,
                    header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .timeout(request_timeout)
            .build()
            .map_err(|e| FeedError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            retry_floor,
        })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        Self::new(
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_millis(config.retry_floor_ms),
        )
    }

    async fn get_page_once(&self, url: &str) -> Result<FeedPage, FeedError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }
        Ok(response.json::<FeedPage>().await?)
    }
}

#[async_trait]
impl FeedTransport for HttpFeedTransport {
    async fn probe(&self, url: &str) -> Result<Option<String>, FeedError> {
        let response = self.client.head(url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }
        let etag = response
            .headers()
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        Ok(etag)
    }

    async fn get_page(&self, url: &str) -> Result<FeedPage, FeedError> {
        match self.get_page_once(url).await {
            Ok(page) => Ok(page),
            Err(FeedError::Transport(e)) => {
                // One retry after the floor delay covers transient feed
                // hiccups without hammering the host
                debug!(url = %url, error = %e, "Feed page request failed, retrying once");
                tokio::time::sleep(self.retry_floor).await;
                self.get_page_once(url).await
            }
            Err(e) => Err(e),
        }
    }
}
