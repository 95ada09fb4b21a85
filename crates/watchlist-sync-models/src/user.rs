use crate::permissions::PermissionSet;
use serde::{Deserialize, Serialize};

/// A user's watchlist feed subscription. One per user; the etag only
/// advances after a sync pass whose fetch succeeded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchlistSubscription {
    pub feed_url: Option<String>,
    pub etag: Option<String>,
}

/// Per-user sync toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    pub watchlist_sync_movies: bool,
    pub watchlist_sync_tv: bool,
}

/// The slice of a user the sync engine needs, with subscription and
/// settings eagerly attached by the user store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub display_name: String,
    pub permissions: PermissionSet,
    pub settings: Option<UserSettings>,
    pub watchlist: Option<WatchlistSubscription>,
}

impl User {
    pub fn feed_url(&self) -> Option<&str> {
        self.watchlist
            .as_ref()
            .and_then(|w| w.feed_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn etag(&self) -> Option<&str> {
        self.watchlist.as_ref().and_then(|w| w.etag.as_deref())
    }

    /// Absent settings count as disabled.
    pub fn movie_sync_enabled(&self) -> bool {
        self.settings
            .as_ref()
            .is_some_and(|s| s.watchlist_sync_movies)
    }

    pub fn tv_sync_enabled(&self) -> bool {
        self.settings.as_ref().is_some_and(|s| s.watchlist_sync_tv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url_empty_string_is_absent() {
        let user = User {
            id: 1,
            display_name: "test".to_string(),
            permissions: PermissionSet::default(),
            settings: None,
            watchlist: Some(WatchlistSubscription {
                feed_url: Some(String::new()),
                etag: None,
            }),
        };
        assert_eq!(user.feed_url(), None);
    }

    #[test]
    fn test_sync_toggles_default_off_without_settings() {
        let user = User {
            id: 1,
            display_name: "test".to_string(),
            permissions: PermissionSet::default(),
            settings: None,
            watchlist: None,
        };
        assert!(!user.movie_sync_enabled());
        assert!(!user.tv_sync_enabled());
    }
}
