use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use watchlist_sync_models::{MediaKind, WatchlistItem};

/// One page of the JSON watchlist feed.
#[derive(Debug, Default, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub items: Vec<FeedEntry>,
    #[serde(default)]
    pub links: FeedLinks,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedLinks {
    /// Continuation URL; absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

/// Raw feed entry before normalization. `guids` holds typed identifier
/// strings of the form `"<scheme>://<value>"`, e.g. `"tmdb://603"`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedEntry {
    #[serde(default)]
    pub guid: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub guids: Vec<String>,
}

/// Feed category → media kind. Table-driven on purpose: new categories are
/// added here, never inferred.
const CATEGORY_KINDS: &[(&str, MediaKind)] = &[
    ("movie", MediaKind::Movie),
    ("show", MediaKind::Series),
    ("tv", MediaKind::Series),
];

pub fn kind_for_category(category: &str) -> Option<MediaKind> {
    CATEGORY_KINDS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, kind)| *kind)
}

/// Split each guid at `"://"` into a scheme → value map. Malformed guids
/// are ignored.
pub fn parse_guids(guids: &[String]) -> HashMap<String, String> {
    guids
        .iter()
        .filter_map(|guid| guid.split_once("://"))
        .map(|(scheme, value)| (scheme.to_string(), value.to_string()))
        .collect()
}

/// Normalize a raw entry into the canonical item shape. Entries with an
/// unrecognized category are dropped.
pub fn normalize_entry(entry: &FeedEntry) -> Option<WatchlistItem> {
    let Some(kind) = kind_for_category(&entry.category) else {
        debug!(
            category = %entry.category,
            title = %entry.title,
            "Skipping feed entry with unrecognized category"
        );
        return None;
    };

    let guids = parse_guids(&entry.guids);
    let tmdb_id = guids
        .get("tmdb")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0);
    let tvdb_id = guids.get("tvdb").and_then(|v| v.parse::<u32>().ok());

    Some(WatchlistItem {
        external_id: entry.guid.clone(),
        tmdb_id,
        tvdb_id,
        kind,
        title: entry.title.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, category: &str, guids: &[&str]) -> FeedEntry {
        FeedEntry {
            guid: format!("feed://{}", title),
            title: title.to_string(),
            category: category.to_string(),
            guids: guids.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn test_normalize_movie_entry() {
        let item = normalize_entry(&entry(
            "The Matrix",
            "movie",
            &["imdb://tt0133093", "tmdb://603"],
        ))
        .unwrap();
        assert_eq!(item.tmdb_id, 603);
        assert_eq!(item.tvdb_id, None);
        assert_eq!(item.kind, MediaKind::Movie);
        assert_eq!(item.title, "The Matrix");
    }

    #[test]
    fn test_show_and_tv_categories_map_to_series() {
        let show = normalize_entry(&entry("Severance", "show", &["tmdb://95396", "tvdb://371980"]))
            .unwrap();
        assert_eq!(show.kind, MediaKind::Series);
        assert_eq!(show.tvdb_id, Some(371980));

        let tv = normalize_entry(&entry("Severance", "tv", &["tmdb://95396"])).unwrap();
        assert_eq!(tv.kind, MediaKind::Series);
    }

    #[test]
    fn test_unknown_category_is_dropped() {
        assert!(normalize_entry(&entry("Some Album", "music", &["tmdb://1"])).is_none());
    }

    #[test]
    fn test_missing_tmdb_guid_defaults_to_zero() {
        let item = normalize_entry(&entry("Obscure", "movie", &["imdb://tt0000001"])).unwrap();
        assert_eq!(item.tmdb_id, 0);
    }

    #[test]
    fn test_parse_guids_ignores_malformed_entries() {
        let guids = vec![
            "tmdb://603".to_string(),
            "garbage".to_string(),
            "tvdb://81189".to_string(),
        ];
        let parsed = parse_guids(&guids);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("tmdb").map(String::as_str), Some("603"));
        assert_eq!(parsed.get("tvdb").map(String::as_str), Some("81189"));
    }

    #[test]
    fn test_page_deserializes_with_absent_links() {
        let page: FeedPage = serde_json::from_str(
            r#"{"items": [{"title": "The Matrix", "category": "movie", "guids": ["tmdb://603"]}]}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.links.next.is_none());
    }
}
