use crate::domain::entities::offline::{
    CacheMetadataRecord, OfflineActionRecord, OptimisticUpdateRecord, SyncQueueItem,
    SyncStatusRecord,
};
use crate::domain::value_objects::{
    AccountId, CacheKey, CacheType, EntityId, EntityType, OfflineActionId, OfflineActionType,
    OfflinePayload, OptimisticUpdateId, RemoteEntityId, SyncQueueId, SyncQueueStatus, SyncStatus,
};
use crate::infrastructure::offline::rows::{
    CacheMetadataRow, OfflineActionRow, OptimisticUpdateRow, SyncQueueItemRow, SyncStatusRow,
};
use crate::shared::error::AppError;
use chrono::{DateTime, TimeZone, Utc};

pub fn datetime_from_unix(seconds: i64) -> Result<DateTime<Utc>, AppError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| AppError::Database(format!("Timestamp out of range: {seconds}")))
}

pub fn optional_datetime_from_unix(
    seconds: Option<i64>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    seconds.map(datetime_from_unix).transpose()
}

fn retry_count_from_i32(value: i32) -> Result<u32, AppError> {
    u32::try_from(value).map_err(|_| AppError::Database(format!("Negative retry count: {value}")))
}

pub fn offline_action_from_row(row: OfflineActionRow) -> Result<OfflineActionRecord, AppError> {
    let payload =
        OfflinePayload::from_json_str(&row.action_data).map_err(AppError::DeserializationError)?;
    let sync_status = if row.is_synced {
        SyncStatus::Synced
    } else if row.error_message.is_some() {
        SyncStatus::Failed
    } else {
        SyncStatus::Pending
    };

    let record = OfflineActionRecord::new(
        Some(row.id),
        OfflineActionId::new(row.local_id).map_err(AppError::Database)?,
        AccountId::new(row.account_id).map_err(AppError::Database)?,
        OfflineActionType::new(row.action_type).map_err(AppError::Database)?,
        row.target_id
            .map(EntityId::new)
            .transpose()
            .map_err(AppError::Database)?,
        payload,
        sync_status,
        datetime_from_unix(row.created_at)?,
        optional_datetime_from_unix(row.synced_at)?,
        row.remote_id
            .map(RemoteEntityId::new)
            .transpose()
            .map_err(AppError::Database)?,
    );

    Ok(record.with_error_message(row.error_message))
}

pub fn sync_queue_item_from_row(row: SyncQueueItemRow) -> Result<SyncQueueItem, AppError> {
    Ok(SyncQueueItem {
        id: SyncQueueId::new(row.id).map_err(AppError::Database)?,
        local_id: row
            .local_id
            .map(OfflineActionId::new)
            .transpose()
            .map_err(AppError::Database)?,
        action_type: OfflineActionType::new(row.action_type).map_err(AppError::Database)?,
        payload: OfflinePayload::from_json_str(&row.payload)
            .map_err(AppError::DeserializationError)?,
        status: SyncQueueStatus::from(row.status.as_str()),
        retry_count: retry_count_from_i32(row.retry_count)?,
        max_retries: retry_count_from_i32(row.max_retries)?,
        created_at: datetime_from_unix(row.created_at)?,
        updated_at: datetime_from_unix(row.updated_at)?,
        synced_at: optional_datetime_from_unix(row.synced_at)?,
        error_message: row.error_message,
    })
}

pub fn cache_metadata_from_row(row: CacheMetadataRow) -> Result<CacheMetadataRecord, AppError> {
    let metadata = row
        .metadata
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(|err| AppError::DeserializationError(err.to_string()))?;

    Ok(CacheMetadataRecord {
        record_id: row.id,
        cache_key: CacheKey::new(row.cache_key).map_err(AppError::Database)?,
        cache_type: CacheType::new(row.cache_type).map_err(AppError::Database)?,
        last_synced_at: optional_datetime_from_unix(row.last_synced_at)?,
        last_accessed_at: optional_datetime_from_unix(row.last_accessed_at)?,
        data_version: row.data_version,
        is_stale: row.is_stale,
        expiry_time: optional_datetime_from_unix(row.expiry_time)?,
        metadata,
    })
}

pub fn optimistic_update_from_row(
    row: OptimisticUpdateRow,
) -> Result<OptimisticUpdateRecord, AppError> {
    Ok(OptimisticUpdateRecord {
        record_id: row.id,
        update_id: OptimisticUpdateId::new(row.update_id).map_err(AppError::Database)?,
        entity_type: EntityType::new(row.entity_type).map_err(AppError::Database)?,
        entity_id: EntityId::new(row.entity_id).map_err(AppError::Database)?,
        original_data: row
            .original_data
            .map(|raw| OfflinePayload::from_json_str(&raw))
            .transpose()
            .map_err(AppError::DeserializationError)?,
        updated_data: OfflinePayload::from_json_str(&row.updated_data)
            .map_err(AppError::DeserializationError)?,
        is_confirmed: row.is_confirmed,
        created_at: datetime_from_unix(row.created_at)?,
        confirmed_at: optional_datetime_from_unix(row.confirmed_at)?,
    })
}

pub fn sync_status_record_from_row(row: SyncStatusRow) -> Result<SyncStatusRecord, AppError> {
    Ok(SyncStatusRecord {
        entity_type: EntityType::new(row.entity_type).map_err(AppError::Database)?,
        entity_id: EntityId::new(row.entity_id).map_err(AppError::Database)?,
        local_version: row.local_version,
        remote_version: row.remote_version,
        last_local_update: datetime_from_unix(row.last_local_update)?,
        last_remote_sync: optional_datetime_from_unix(row.last_remote_sync)?,
        sync_status: SyncStatus::from(row.sync_status.as_str()),
        conflict_data: row
            .conflict_data
            .map(|raw| OfflinePayload::from_json_str(&raw))
            .transpose()
            .map_err(AppError::DeserializationError)?,
    })
}
