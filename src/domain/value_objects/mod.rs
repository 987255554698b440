pub mod account;
pub mod offline;

pub use account::AccountId;
pub use offline::{
    CacheKey, CacheType, EntityId, EntityType, OfflineActionId, OfflineActionType, OfflinePayload,
    OptimisticUpdateId, RemoteEntityId, SyncQueueId, SyncQueueStatus, SyncStatus,
};
