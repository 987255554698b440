pub mod action_id;
pub mod action_type;
pub mod cache_key;
pub mod cache_type;
pub mod entity_id;
pub mod entity_type;
pub mod optimistic_update_id;
pub mod payload;
pub mod remote_entity_id;
pub mod sync_queue_id;
pub mod sync_queue_status;
pub mod sync_status;

pub use action_id::OfflineActionId;
pub use action_type::OfflineActionType;
pub use cache_key::CacheKey;
pub use cache_type::CacheType;
pub use entity_id::EntityId;
pub use entity_type::EntityType;
pub use optimistic_update_id::OptimisticUpdateId;
pub use payload::OfflinePayload;
pub use remote_entity_id::RemoteEntityId;
pub use sync_queue_id::SyncQueueId;
pub use sync_queue_status::SyncQueueStatus;
pub use sync_status::SyncStatus;
