pub mod media;
pub mod permissions;
pub mod request;
pub mod user;
pub mod watchlist;

pub use media::{AvailabilityRecord, AvailabilityStatus, MediaKind};
pub use permissions::{Permission, PermissionSet};
pub use request::{MediaRequest, NewRequest, QualityTier, RequestError, RequestedSeasons};
pub use user::{User, UserSettings, WatchlistSubscription};
pub use watchlist::WatchlistItem;
