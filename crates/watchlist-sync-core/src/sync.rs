use crate::dispatch::{dispatch_item, AutoRequestOutcome};
use crate::filter::filter_unavailable;
use crate::traits::{AvailabilityIndex, RequestService, UserStore};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use watchlist_sync_feed::WatchlistFeed;
use watchlist_sync_models::{Permission, User};

/// The watchlist sync engine. Constructed once at process start with
/// handles to its collaborators and shared behind an `Arc`; it keeps no
/// ambient state of its own.
pub struct WatchlistSyncEngine {
    users: Arc<dyn UserStore>,
    availability: Arc<dyn AvailabilityIndex>,
    requests: Arc<dyn RequestService>,
    feed: Arc<dyn WatchlistFeed>,
}

/// Aggregate of one full sweep over all eligible users.
#[derive(Debug)]
pub struct SyncSummary {
    pub users_synced: usize,
    pub requests_created: usize,
    pub duration: Duration,
    pub errors: Vec<String>,
}

impl WatchlistSyncEngine {
    pub fn new(
        users: Arc<dyn UserStore>,
        availability: Arc<dyn AvailabilityIndex>,
        requests: Arc<dyn RequestService>,
        feed: Arc<dyn WatchlistFeed>,
    ) -> Self {
        Self {
            users,
            availability,
            requests,
            feed,
        }
    }

    /// One sweep: sync every eligible user, strictly one at a time so the
    /// request-submission load stays bounded and per-user logs stay
    /// coherent. Never fails; a selector error yields an empty summary
    /// with the error recorded.
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> SyncSummary {
        let start = Instant::now();
        let mut errors = Vec::new();

        let users = match self.users.list_sync_eligible_users().await {
            Ok(users) => users,
            Err(e) => {
                error!(error = %e, "Failed to load watchlist sync users");
                errors.push(format!("Failed to load watchlist sync users: {}", e));
                return SyncSummary {
                    users_synced: 0,
                    requests_created: 0,
                    duration: start.elapsed(),
                    errors,
                };
            }
        };

        info!(user_count = users.len(), "Starting watchlist sync sweep");

        let mut requests_created = 0;
        for user in &users {
            requests_created += self.sync_user(user).await;
        }

        SyncSummary {
            users_synced: users.len(),
            requests_created,
            duration: start.elapsed(),
            errors,
        }
    }

    /// Sync one user's watchlist. Infallible by contract: every failure is
    /// classified and logged here so the caller's sweep is never
    /// interrupted. Returns the number of requests created.
    pub async fn sync_user(&self, user: &User) -> usize {
        let Some(feed_url) = user.feed_url() else {
            warn!(
                user = %user.display_name,
                "Skipping watchlist sync for user without a feed URL"
            );
            return 0;
        };

        if !user.permissions.has_any(&[
            Permission::AutoRequest,
            Permission::AutoRequestMovie,
            Permission::AutoApproveTv,
        ]) {
            return 0;
        }

        if !user.movie_sync_enabled() && !user.tv_sync_enabled() {
            return 0;
        }

        // Conditional fetch: a matching token means nothing changed since
        // the last successful pass
        let current_etag = match self.feed.probe(feed_url).await {
            Ok(etag) => etag,
            Err(e) => {
                error!(
                    user_id = user.id,
                    error = %e,
                    "Failed to probe watchlist feed"
                );
                return 0;
            }
        };
        if let (Some(stored), Some(current)) = (user.etag(), current_etag.as_deref()) {
            if stored == current {
                debug!(user_id = user.id, "Feed etag unchanged, skipping fetch");
                return 0;
            }
        }

        let items = match self.feed.fetch(feed_url).await {
            Ok(items) => items,
            Err(e) => {
                // Fail open: one broken feed must not break the sweep, and
                // the etag stays put so the next pass retries
                error!(
                    user_id = user.id,
                    error = %e,
                    "Failed to retrieve watchlist items"
                );
                return 0;
            }
        };

        let tmdb_ids: Vec<u32> = items.iter().map(|i| i.tmdb_id).collect();
        let records = match self.availability.lookup_by_tmdb_ids(&tmdb_ids).await {
            Ok(records) => records,
            Err(e) => {
                error!(
                    user_id = user.id,
                    error = %e,
                    "Failed to look up media availability for watchlist items"
                );
                return 0;
            }
        };

        let candidates = filter_unavailable(items, &records);
        debug!(
            user_id = user.id,
            candidate_count = candidates.len(),
            "Dispatching watchlist candidates"
        );

        // Item dispatches run concurrently; outcomes are isolated per item
        // and all must settle before the etag commit
        let outcomes = join_all(
            candidates
                .iter()
                .map(|item| dispatch_item(self.requests.as_ref(), user, item)),
        )
        .await;
        let created = outcomes
            .iter()
            .filter(|o| matches!(o, AutoRequestOutcome::Created))
            .count();

        // The fetch succeeded, so the pass counts even if individual
        // dispatches failed
        if let Some(etag) = current_etag {
            if let Err(e) = self.users.update_etag(user.id, &etag).await {
                error!(
                    user_id = user.id,
                    error = %e,
                    "Failed to persist watchlist feed etag"
                );
            }
        }

        created
    }
}
