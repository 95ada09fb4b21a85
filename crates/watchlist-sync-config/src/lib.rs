pub mod config;
pub mod paths;

pub use config::{Config, FeedConfig, SchedulerConfig};
pub use paths::{container_base_path, PathManager};
