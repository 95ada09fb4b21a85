use crate::traits::RequestService;
use tracing::{debug, error, info};
use watchlist_sync_models::{
    MediaKind, NewRequest, Permission, QualityTier, RequestError, RequestedSeasons, User,
    WatchlistItem,
};

/// Result of one auto-request dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoRequestOutcome {
    Created,
    SkippedDuplicate,
    SkippedQuota,
    SkippedPermission,
    SkippedNoSeasons,
    SkippedUnresolvedId,
    Failed(String),
}

/// Per-kind re-check of permission and sync toggle, evaluated again at
/// dispatch time because the orchestrator-level gate only requires one of
/// the auto-request grants.
fn kind_gate_passes(user: &User, kind: MediaKind) -> bool {
    match kind {
        MediaKind::Movie => {
            user.permissions
                .has_any(&[Permission::AutoRequest, Permission::AutoRequestMovie])
                && user.movie_sync_enabled()
        }
        MediaKind::Series => {
            user.permissions
                .has_any(&[Permission::AutoRequest, Permission::AutoRequestTv])
                && user.tv_sync_enabled()
        }
    }
}

fn build_request(item: &WatchlistItem) -> NewRequest {
    NewRequest {
        media_id: item.tmdb_id,
        media_type: item.kind,
        seasons: match item.kind {
            MediaKind::Series => Some(RequestedSeasons::All),
            MediaKind::Movie => None,
        },
        tvdb_id: item.tvdb_id,
        quality: QualityTier::Standard,
        is_auto_request: true,
    }
}

/// Submit one watchlist item as an auto-request and classify the result.
/// Never fails; every path collapses into an outcome.
pub async fn dispatch_item(
    requests: &dyn RequestService,
    user: &User,
    item: &WatchlistItem,
) -> AutoRequestOutcome {
    if item.kind == MediaKind::Series && item.tvdb_id.is_none() {
        error!(
            user_id = user.id,
            title = %item.title,
            "Cannot auto-request series without a TVDB id from feed metadata"
        );
        return AutoRequestOutcome::SkippedUnresolvedId;
    }

    if !kind_gate_passes(user, item.kind) {
        // Expected steady state while toggles or grants are off, so no log
        return AutoRequestOutcome::SkippedPermission;
    }

    match requests.submit(user, build_request(item)).await {
        Ok(request) => {
            info!(
                user_id = user.id,
                request_id = request.id,
                title = %item.title,
                "Created media request from user's watchlist"
            );
            AutoRequestOutcome::Created
        }
        Err(e) => {
            if e.is_expected() {
                // Constant polling makes quota, duplicate and permission
                // rejections routine; keep them out of the error log
                debug!(
                    user_id = user.id,
                    title = %item.title,
                    error = %e,
                    "Failed to create media request from watchlist"
                );
            } else {
                error!(
                    user_id = user.id,
                    title = %item.title,
                    error = %e,
                    "Failed to create media request from watchlist"
                );
            }
            match e {
                RequestError::PermissionDenied => AutoRequestOutcome::SkippedPermission,
                RequestError::Duplicate => AutoRequestOutcome::SkippedDuplicate,
                RequestError::QuotaExceeded => AutoRequestOutcome::SkippedQuota,
                RequestError::NoSeasonsAvailable => AutoRequestOutcome::SkippedNoSeasons,
                RequestError::Other(reason) => AutoRequestOutcome::Failed(reason),
            }
        }
    }
}
