pub mod cache_metadata;
pub mod cache_status;
pub mod commands;
pub mod offline_action;
pub mod optimistic_update;
pub mod replay_outcome;
pub mod saved_action;
pub mod sync_queue_item;
pub mod sync_status_record;

pub use cache_metadata::CacheMetadataRecord;
pub use cache_status::{CacheStatusSnapshot, CacheTypeStatus};
pub use commands::{
    CacheMetadataUpdate, ClearScope, OfflineActionDraft, OfflineActionFilter,
    OptimisticUpdateDraft, SyncStatusUpdate,
};
pub use offline_action::OfflineActionRecord;
pub use optimistic_update::OptimisticUpdateRecord;
pub use replay_outcome::ReplayOutcome;
pub use saved_action::SavedOfflineAction;
pub use sync_queue_item::SyncQueueItem;
pub use sync_status_record::SyncStatusRecord;
