//! Offline action queue and sync core for the Harmonia music client.
//!
//! Mutations that fail while offline or with an expired credential are
//! recorded in a local SQLite queue and replayed against the REST backend
//! once connectivity (or a fresh token) is available.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::ports::notification::{NotificationSeverity, NotificationSink};
pub use application::ports::remote_gateway::{RemoteAck, RemoteCallError, RemoteGateway};
pub use application::services::fallback::{FallbackError, OfflineFallback};
pub use application::services::offline_service::{
    OfflineActionsQuery, OfflineService, OfflineServiceTrait, SaveOfflineActionParams,
};
pub use infrastructure::offline::{ReplayJob, SqliteOfflinePersistence};
pub use shared::config::AppConfig;
pub use shared::error::{AppError, Result};
pub use shared::logging::init_logging;
