use crate::domain::value_objects::{
    AccountId, CacheKey, CacheType, EntityId, EntityType, OfflineActionType, OfflinePayload,
    SyncStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// オフラインアクションを保存する際に使用するドラフト。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfflineActionDraft {
    pub account_id: AccountId,
    pub action_type: OfflineActionType,
    pub target_id: Option<EntityId>,
    pub payload: OfflinePayload,
    pub max_retries: u32,
}

impl OfflineActionDraft {
    pub fn new(
        account_id: AccountId,
        action_type: OfflineActionType,
        target_id: Option<EntityId>,
        payload: OfflinePayload,
        max_retries: u32,
    ) -> Self {
        Self {
            account_id,
            action_type,
            target_id,
            payload,
            max_retries,
        }
    }
}

/// オフラインアクション取得時のフィルタ。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfflineActionFilter {
    pub account_id: Option<AccountId>,
    pub include_synced: Option<bool>,
    pub limit: Option<u32>,
}

impl OfflineActionFilter {
    pub fn new(
        account_id: Option<AccountId>,
        include_synced: Option<bool>,
        limit: Option<u32>,
    ) -> Self {
        Self {
            account_id,
            include_synced,
            limit,
        }
    }
}

/// `clear` 操作の対象範囲。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ClearScope {
    pub action_type: Option<OfflineActionType>,
}

impl ClearScope {
    pub fn all() -> Self {
        Self { action_type: None }
    }

    pub fn of(action_type: OfflineActionType) -> Self {
        Self {
            action_type: Some(action_type),
        }
    }
}

/// 楽観的更新の保存に利用するドラフト。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimisticUpdateDraft {
    pub entity_type: EntityType,
    pub entity_id: EntityId,
    pub original_data: Option<OfflinePayload>,
    pub updated_data: OfflinePayload,
}

impl OptimisticUpdateDraft {
    pub fn new(
        entity_type: EntityType,
        entity_id: EntityId,
        original_data: Option<OfflinePayload>,
        updated_data: OfflinePayload,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            original_data,
            updated_data,
        }
    }
}

/// キャッシュメタデータの upsert コマンド。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheMetadataUpdate {
    pub cache_key: CacheKey,
    pub cache_type: CacheType,
    pub metadata: Option<serde_json::Value>,
    pub expiry: Option<DateTime<Utc>>,
}

/// 同期状態の更新に使用するコマンド。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncStatusUpdate {
    pub entity_type: EntityType,
    pub entity_id: EntityId,
    pub sync_status: SyncStatus,
    pub conflict_data: Option<OfflinePayload>,
    pub updated_at: DateTime<Utc>,
}

impl SyncStatusUpdate {
    pub fn new(
        entity_type: EntityType,
        entity_id: EntityId,
        sync_status: SyncStatus,
        conflict_data: Option<OfflinePayload>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            sync_status,
            conflict_data,
            updated_at,
        }
    }
}
