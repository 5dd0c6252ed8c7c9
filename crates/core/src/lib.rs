pub mod config;
pub mod filter;
pub mod loader;
pub mod model;
pub mod notify;
pub mod source;
pub mod store;

pub use config::{AppConfig, ConfigOverrides};
pub use filter::FilterCriteria;
pub use loader::{apply_outcome, spawn_load, LoadOutcome, LoadState, PendingLoad};
pub use model::*;
pub use notify::Notification;
pub use source::{FileSource, HttpSource, SourceError, StaticSource, TodoSource};
pub use store::{LoadReport, StoreError, TaskStore};
