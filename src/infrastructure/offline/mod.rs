mod mappers;
pub mod metrics;
pub mod replay_job;
mod rows;
pub mod sqlite_store;

pub use replay_job::{OfflineRequeueReport, ReplayJob};
pub use sqlite_store::SqliteOfflinePersistence;
