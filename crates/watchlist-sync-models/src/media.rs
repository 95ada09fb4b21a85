use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Series,
}

/// How much of a title the local library already holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Unknown,
    PartiallyAvailable,
    Available,
}

/// Read-only row from the media-availability index, keyed by TMDB id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityRecord {
    pub tmdb_id: u32,
    pub kind: MediaKind,
    pub status: AvailabilityStatus,
}
