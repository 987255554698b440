use crate::application::ports::offline_store::OfflinePersistence;
use crate::domain::entities::offline::{
    CacheMetadataRecord, CacheMetadataUpdate, CacheStatusSnapshot, CacheTypeStatus, ClearScope,
    OfflineActionDraft, OfflineActionFilter, OfflineActionRecord, OptimisticUpdateDraft,
    OptimisticUpdateRecord, SavedOfflineAction, SyncQueueItem, SyncStatusRecord, SyncStatusUpdate,
};
use crate::domain::value_objects::{
    CacheType, EntityId, OfflineActionId, OfflinePayload, OptimisticUpdateId, RemoteEntityId,
    SyncQueueId,
};
use crate::infrastructure::offline::mappers::{
    cache_metadata_from_row, offline_action_from_row, optional_datetime_from_unix,
    optimistic_update_from_row, sync_queue_item_from_row, sync_status_record_from_row,
};
use crate::infrastructure::offline::rows::{
    CacheMetadataRow, OfflineActionRow, OptimisticUpdateRow, SyncQueueItemRow, SyncStatusRow,
};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

pub struct SqliteOfflinePersistence {
    pool: Pool<Sqlite>,
}

impl SqliteOfflinePersistence {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    async fn get_action_by_id(&self, id: i64) -> Result<OfflineActionRecord, AppError> {
        let row = sqlx::query_as::<_, OfflineActionRow>(
            r#"
            SELECT * FROM offline_actions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        offline_action_from_row(row)
    }
}

#[async_trait]
impl OfflinePersistence for SqliteOfflinePersistence {
    async fn save_action(&self, draft: OfflineActionDraft) -> Result<SavedOfflineAction, AppError> {
        let local_id = Uuid::new_v4().to_string();
        let action_data = serde_json::to_string(draft.payload.as_json())?;
        let created_at = Utc::now().timestamp();

        // アクション本体とキュー項目を同一トランザクションで書き、片割れが残らないようにする
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO offline_actions (
                account_id, action_type, target_id, action_data,
                local_id, is_synced, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)
            "#,
        )
        .bind(draft.account_id.as_str())
        .bind(draft.action_type.as_str())
        .bind(draft.target_id.as_ref().map(ToString::to_string))
        .bind(&action_data)
        .bind(&local_id)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        sqlx::query(
            r#"
            INSERT INTO sync_queue (
                local_id, action_type, payload, status,
                retry_count, max_retries, created_at, updated_at
            ) VALUES (?1, ?2, ?3, 'pending', 0, ?4, ?5, ?5)
            "#,
        )
        .bind(&local_id)
        .bind(draft.action_type.as_str())
        .bind(&action_data)
        .bind(i64::from(draft.max_retries))
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let action = self.get_action_by_id(id).await?;
        Ok(SavedOfflineAction::new(action.local_id.clone(), action))
    }

    async fn list_actions(
        &self,
        filter: OfflineActionFilter,
    ) -> Result<Vec<OfflineActionRecord>, AppError> {
        let rows = sqlx::query_as::<_, OfflineActionRow>(
            r#"
            SELECT * FROM offline_actions
            WHERE (?1 IS NULL OR account_id = ?1)
              AND (?2 IS NULL OR is_synced = ?2)
            ORDER BY created_at ASC, id ASC
            LIMIT COALESCE(?3, -1)
            "#,
        )
        .bind(filter.account_id.as_ref().map(|id| id.as_str().to_string()))
        .bind(filter.include_synced)
        .bind(filter.limit.map(i64::from))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(offline_action_from_row).collect()
    }

    async fn clear_actions(&self, scope: ClearScope) -> Result<u64, AppError> {
        let action_type = scope.action_type.as_ref().map(|kind| kind.as_str().to_string());

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM sync_queue
            WHERE ?1 IS NULL OR action_type = ?1
            "#,
        )
        .bind(&action_type)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
            DELETE FROM offline_actions
            WHERE ?1 IS NULL OR action_type = ?1
            "#,
        )
        .bind(&action_type)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }

    async fn find_action(
        &self,
        local_id: &OfflineActionId,
    ) -> Result<Option<OfflineActionRecord>, AppError> {
        let row = sqlx::query_as::<_, OfflineActionRow>(
            r#"
            SELECT * FROM offline_actions
            WHERE local_id = ?1
            "#,
        )
        .bind(local_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(offline_action_from_row).transpose()
    }

    async fn mark_action_synced(
        &self,
        local_id: &OfflineActionId,
        remote_id: Option<RemoteEntityId>,
        synced_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE offline_actions
            SET is_synced = 1, synced_at = ?1, remote_id = ?2, error_message = NULL
            WHERE local_id = ?3
            "#,
        )
        .bind(synced_at.timestamp())
        .bind(remote_id.as_ref().map(|id| id.as_str().to_string()))
        .bind(local_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn enqueue_if_missing(&self, action: &OfflineActionRecord) -> Result<bool, AppError> {
        let existing = sqlx::query(
            r#"
            SELECT id FROM sync_queue
            WHERE local_id = ?1 AND status IN ('pending', 'failed')
            LIMIT 1
            "#,
        )
        .bind(action.local_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_some() {
            return Ok(false);
        }

        let payload = serde_json::to_string(action.payload.as_json())?;
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO sync_queue (
                local_id, action_type, payload, status,
                retry_count, max_retries, created_at, updated_at
            ) VALUES (?1, ?2, ?3, 'pending', 0, 3, ?4, ?4)
            "#,
        )
        .bind(action.local_id.as_str())
        .bind(action.action_type.as_str())
        .bind(&payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    async fn pending_sync_items(&self) -> Result<Vec<SyncQueueItem>, AppError> {
        let rows = sqlx::query_as::<_, SyncQueueItemRow>(
            r#"
            SELECT * FROM sync_queue
            WHERE status = 'pending'
               OR (status = 'failed' AND retry_count < max_retries)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(sync_queue_item_from_row).collect()
    }

    async fn complete_queue_item(
        &self,
        id: SyncQueueId,
        synced_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE sync_queue
            SET status = 'completed', synced_at = ?1, updated_at = ?1, error_message = NULL
            WHERE id = ?2
            "#,
        )
        .bind(synced_at.timestamp())
        .bind(id.value())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_queue_failure(&self, id: SyncQueueId, error: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE sync_queue
            SET status = 'failed', retry_count = retry_count + 1,
                error_message = ?1, updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(error)
        .bind(Utc::now().timestamp())
        .bind(id.value())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn reject_queue_item(&self, id: SyncQueueId, error: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE sync_queue
            SET status = 'rejected', error_message = ?1, updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(error)
        .bind(Utc::now().timestamp())
        .bind(id.value())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn cache_status(&self) -> Result<CacheStatusSnapshot, AppError> {
        let total_result = sqlx::query(r#"SELECT COUNT(*) as count FROM cache_metadata"#)
            .fetch_one(&self.pool)
            .await?;
        let total_items: i64 = total_result.try_get("count").unwrap_or(0);

        let stale_result =
            sqlx::query(r#"SELECT COUNT(*) as count FROM cache_metadata WHERE is_stale = 1"#)
                .fetch_one(&self.pool)
                .await?;
        let stale_items: i64 = stale_result.try_get("count").unwrap_or(0);

        let cache_types_result = sqlx::query(
            r#"
            SELECT
                cache_type,
                COUNT(*) as item_count,
                MAX(last_synced_at) as last_synced_at,
                MAX(is_stale) as is_stale
            FROM cache_metadata
            GROUP BY cache_type
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut cache_types = Vec::with_capacity(cache_types_result.len());
        for row in cache_types_result {
            let cache_type: String = row.try_get("cache_type").unwrap_or_default();
            let item_count: i64 = row.try_get("item_count").unwrap_or(0);
            let last_synced_at: Option<i64> = row.try_get("last_synced_at").ok();
            let is_stale = row.try_get::<i32, _>("is_stale").unwrap_or(0) > 0;

            cache_types.push(CacheTypeStatus {
                cache_type: CacheType::new(cache_type).map_err(AppError::Database)?,
                item_count: u64::try_from(item_count).unwrap_or(0),
                last_synced_at: optional_datetime_from_unix(last_synced_at)?,
                is_stale,
            });
        }

        Ok(CacheStatusSnapshot::new(
            u64::try_from(total_items).unwrap_or(0),
            u64::try_from(stale_items).unwrap_or(0),
            cache_types,
        ))
    }

    async fn upsert_cache_metadata(&self, update: CacheMetadataUpdate) -> Result<(), AppError> {
        let now = Utc::now().timestamp();
        let metadata = update
            .metadata
            .map(|m| serde_json::to_string(&m))
            .transpose()?;
        let expiry_time = update.expiry.map(|expiry| expiry.timestamp());

        sqlx::query(
            r#"
            INSERT INTO cache_metadata (
                cache_key, cache_type, last_synced_at, last_accessed_at,
                data_version, is_stale, expiry_time, metadata
            ) VALUES (?1, ?2, ?3, ?3, 1, 0, ?4, ?5)
            ON CONFLICT(cache_key) DO UPDATE SET
                cache_type = excluded.cache_type,
                last_synced_at = excluded.last_synced_at,
                last_accessed_at = excluded.last_accessed_at,
                data_version = data_version + 1,
                expiry_time = excluded.expiry_time,
                metadata = excluded.metadata
            "#,
        )
        .bind(update.cache_key.as_str())
        .bind(update.cache_type.as_str())
        .bind(now)
        .bind(expiry_time)
        .bind(metadata)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn cleanup_expired_cache(&self) -> Result<u32, AppError> {
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            DELETE FROM cache_metadata
            WHERE expiry_time IS NOT NULL AND expiry_time < ?1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(u32::try_from(result.rows_affected()).unwrap_or(u32::MAX))
    }

    async fn stale_cache_entries(&self) -> Result<Vec<CacheMetadataRecord>, AppError> {
        let now = Utc::now().timestamp();
        let rows = sqlx::query_as::<_, CacheMetadataRow>(
            r#"
            SELECT * FROM cache_metadata
            WHERE is_stale = 1
               OR (expiry_time IS NOT NULL AND expiry_time < ?1)
            ORDER BY COALESCE(last_synced_at, 0) ASC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(cache_metadata_from_row).collect()
    }

    async fn save_optimistic_update(
        &self,
        draft: OptimisticUpdateDraft,
    ) -> Result<OptimisticUpdateId, AppError> {
        let update_id = Uuid::new_v4().to_string();
        let created_at = Utc::now().timestamp();
        let original_data = draft
            .original_data
            .map(|payload| serde_json::to_string(payload.as_json()))
            .transpose()?;
        let updated_data = serde_json::to_string(draft.updated_data.as_json())?;

        sqlx::query(
            r#"
            INSERT INTO optimistic_updates (
                update_id, entity_type, entity_id, original_data,
                updated_data, is_confirmed, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)
            "#,
        )
        .bind(&update_id)
        .bind(draft.entity_type.as_str())
        .bind(draft.entity_id.as_str())
        .bind(&original_data)
        .bind(&updated_data)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        OptimisticUpdateId::new(update_id).map_err(AppError::Database)
    }

    async fn confirm_optimistic_update(
        &self,
        update_id: OptimisticUpdateId,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE optimistic_updates
            SET is_confirmed = 1, confirmed_at = ?1
            WHERE update_id = ?2
            "#,
        )
        .bind(Utc::now().timestamp())
        .bind(update_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn confirm_optimistic_updates_for_entity(
        &self,
        entity_id: &EntityId,
    ) -> Result<u32, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE optimistic_updates
            SET is_confirmed = 1, confirmed_at = ?1
            WHERE entity_id = ?2 AND is_confirmed = 0
            "#,
        )
        .bind(Utc::now().timestamp())
        .bind(entity_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(u32::try_from(result.rows_affected()).unwrap_or(u32::MAX))
    }

    async fn rollback_optimistic_update(
        &self,
        update_id: OptimisticUpdateId,
    ) -> Result<Option<OfflinePayload>, AppError> {
        let row = sqlx::query_as::<_, OptimisticUpdateRow>(
            r#"
            SELECT * FROM optimistic_updates
            WHERE update_id = ?1
            "#,
        )
        .bind(update_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query(r#"DELETE FROM optimistic_updates WHERE update_id = ?1"#)
            .bind(update_id.as_str())
            .execute(&self.pool)
            .await?;

        let record = optimistic_update_from_row(row)?;
        Ok(record.original_data)
    }

    async fn unconfirmed_updates(&self) -> Result<Vec<OptimisticUpdateRecord>, AppError> {
        let rows = sqlx::query_as::<_, OptimisticUpdateRow>(
            r#"
            SELECT * FROM optimistic_updates
            WHERE is_confirmed = 0
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(optimistic_update_from_row).collect()
    }

    async fn update_sync_status(&self, update: SyncStatusUpdate) -> Result<(), AppError> {
        let conflict_data = update
            .conflict_data
            .map(|payload| serde_json::to_string(payload.as_json()))
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO sync_status (
                entity_type, entity_id, local_version, last_local_update,
                sync_status, conflict_data
            ) VALUES (?1, ?2, 1, ?3, ?4, ?5)
            ON CONFLICT(entity_type, entity_id) DO UPDATE SET
                local_version = local_version + 1,
                last_local_update = excluded.last_local_update,
                sync_status = excluded.sync_status,
                conflict_data = excluded.conflict_data
            "#,
        )
        .bind(update.entity_type.as_str())
        .bind(update.entity_id.as_str())
        .bind(update.updated_at.timestamp())
        .bind(update.sync_status.as_str())
        .bind(&conflict_data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn sync_conflicts(&self) -> Result<Vec<SyncStatusRecord>, AppError> {
        let rows = sqlx::query_as::<_, SyncStatusRow>(
            r#"
            SELECT * FROM sync_status
            WHERE sync_status IN ('conflict', 'failed', 'pending')
            ORDER BY last_local_update DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(sync_status_record_from_row).collect()
    }
}
