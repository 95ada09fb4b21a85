use async_trait::async_trait;
use watchlist_sync_models::{AvailabilityRecord, MediaRequest, NewRequest, RequestError, User};

/// Read side of the user directory plus the one write the engine performs.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Users with a non-empty feed URL configured, subscription and
    /// settings eagerly attached, in stable order. Read-only.
    async fn list_sync_eligible_users(&self) -> anyhow::Result<Vec<User>>;

    /// Persist the subscription's cache-validation token. Committing the
    /// same token twice is a no-op in effect.
    async fn update_etag(&self, user_id: i32, etag: &str) -> anyhow::Result<()>;
}

/// The local media-availability index. Read-only.
#[async_trait]
pub trait AvailabilityIndex: Send + Sync {
    async fn lookup_by_tmdb_ids(&self, tmdb_ids: &[u32]) -> anyhow::Result<Vec<AvailabilityRecord>>;
}

/// The request-submission collaborator. Failures arrive as the closed
/// `RequestError` taxonomy so the dispatcher can classify them with an
/// exhaustive match.
#[async_trait]
pub trait RequestService: Send + Sync {
    async fn submit(&self, user: &User, request: NewRequest)
        -> Result<MediaRequest, RequestError>;
}
