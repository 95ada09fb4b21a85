use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("feed returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid feed client configuration: {0}")]
    Config(String),
}
