use crate::domain::entities::offline::{
    CacheMetadataRecord, CacheMetadataUpdate, CacheStatusSnapshot, ClearScope, OfflineActionDraft,
    OfflineActionFilter, OfflineActionRecord, OptimisticUpdateDraft, OptimisticUpdateRecord,
    SavedOfflineAction, SyncQueueItem, SyncStatusRecord, SyncStatusUpdate,
};
use crate::domain::value_objects::{
    EntityId, OfflineActionId, OfflinePayload, OptimisticUpdateId, RemoteEntityId, SyncQueueId,
};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait OfflinePersistence: Send + Sync {
    /// アクションと対応するキュー項目を1トランザクションで保存する。
    async fn save_action(&self, draft: OfflineActionDraft) -> Result<SavedOfflineAction, AppError>;
    async fn list_actions(
        &self,
        filter: OfflineActionFilter,
    ) -> Result<Vec<OfflineActionRecord>, AppError>;
    async fn clear_actions(&self, scope: ClearScope) -> Result<u64, AppError>;
    async fn find_action(
        &self,
        local_id: &OfflineActionId,
    ) -> Result<Option<OfflineActionRecord>, AppError>;
    async fn mark_action_synced(
        &self,
        local_id: &OfflineActionId,
        remote_id: Option<RemoteEntityId>,
        synced_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// 未同期アクションに対応するキュー項目が無ければ追加する。追加した場合 `true`。
    async fn enqueue_if_missing(&self, action: &OfflineActionRecord) -> Result<bool, AppError>;
    async fn pending_sync_items(&self) -> Result<Vec<SyncQueueItem>, AppError>;
    async fn complete_queue_item(
        &self,
        id: SyncQueueId,
        synced_at: DateTime<Utc>,
    ) -> Result<(), AppError>;
    async fn record_queue_failure(&self, id: SyncQueueId, error: &str) -> Result<(), AppError>;
    async fn reject_queue_item(&self, id: SyncQueueId, error: &str) -> Result<(), AppError>;

    async fn cache_status(&self) -> Result<CacheStatusSnapshot, AppError>;
    async fn upsert_cache_metadata(&self, update: CacheMetadataUpdate) -> Result<(), AppError>;
    async fn cleanup_expired_cache(&self) -> Result<u32, AppError>;
    async fn stale_cache_entries(&self) -> Result<Vec<CacheMetadataRecord>, AppError>;

    async fn save_optimistic_update(
        &self,
        draft: OptimisticUpdateDraft,
    ) -> Result<OptimisticUpdateId, AppError>;
    async fn confirm_optimistic_update(
        &self,
        update_id: OptimisticUpdateId,
    ) -> Result<(), AppError>;
    async fn confirm_optimistic_updates_for_entity(
        &self,
        entity_id: &EntityId,
    ) -> Result<u32, AppError>;
    async fn rollback_optimistic_update(
        &self,
        update_id: OptimisticUpdateId,
    ) -> Result<Option<OfflinePayload>, AppError>;
    async fn unconfirmed_updates(&self) -> Result<Vec<OptimisticUpdateRecord>, AppError>;

    async fn update_sync_status(&self, update: SyncStatusUpdate) -> Result<(), AppError>;
    async fn sync_conflicts(&self) -> Result<Vec<SyncStatusRecord>, AppError>;
}
