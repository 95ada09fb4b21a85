pub mod dispatch;
pub mod filter;
pub mod scheduler;
pub mod sync;
pub mod traits;

pub use dispatch::AutoRequestOutcome;
pub use filter::filter_unavailable;
pub use scheduler::SyncScheduler;
pub use sync::{SyncSummary, WatchlistSyncEngine};
pub use traits::{AvailabilityIndex, RequestService, UserStore};
