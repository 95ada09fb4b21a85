use crate::media::MediaKind;
use serde::{Deserialize, Serialize};

/// One entry from a user's watchlist feed, normalized from the raw wire
/// shape. Produced fresh on every fetch and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistItem {
    /// Stable identifier assigned by the feed itself.
    pub external_id: String,
    /// Primary cross-reference key against the availability index. Zero
    /// when the feed carried no `tmdb` guid.
    pub tmdb_id: u32,
    /// Secondary catalogue id. Required before a series can be requested.
    pub tvdb_id: Option<u32>,
    pub kind: MediaKind,
    pub title: String,
}
