use watchlist_sync_models::{AvailabilityRecord, AvailabilityStatus, MediaKind, WatchlistItem};

/// Drop items the library already satisfies: a movie record with any known
/// status, or a series record that is fully available. Partially available
/// series stay in, since more seasons may still be wanted. Order is
/// preserved.
pub fn filter_unavailable(
    items: Vec<WatchlistItem>,
    records: &[AvailabilityRecord],
) -> Vec<WatchlistItem> {
    items
        .into_iter()
        .filter(|item| !is_satisfied(item, records))
        .collect()
}

fn is_satisfied(item: &WatchlistItem, records: &[AvailabilityRecord]) -> bool {
    records.iter().any(|record| {
        record.tmdb_id == item.tmdb_id
            && match record.kind {
                MediaKind::Movie => record.status != AvailabilityStatus::Unknown,
                MediaKind::Series => record.status == AvailabilityStatus::Available,
            }
    })
}
