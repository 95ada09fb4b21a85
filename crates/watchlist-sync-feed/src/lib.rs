pub mod client;
pub mod error;
pub mod transport;
pub mod wire;

pub use client::{WatchlistFeed, WatchlistFeedClient, DEFAULT_PAGE_CAP};
pub use error::FeedError;
pub use transport::{FeedTransport, HttpFeedTransport};
pub use wire::{FeedEntry, FeedLinks, FeedPage};
