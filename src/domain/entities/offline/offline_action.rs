use crate::domain::value_objects::{
    AccountId, EntityId, OfflineActionId, OfflineActionType, OfflinePayload, RemoteEntityId,
    SyncStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 保存済みオフラインアクション。保存後は不変で、リプレイ成功時に同期情報のみ更新される。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfflineActionRecord {
    pub record_id: Option<i64>,
    pub local_id: OfflineActionId,
    pub account_id: AccountId,
    pub action_type: OfflineActionType,
    pub target_id: Option<EntityId>,
    pub payload: OfflinePayload,
    pub remote_id: Option<RemoteEntityId>,
    pub sync_status: SyncStatus,
    pub created_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl OfflineActionRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        record_id: Option<i64>,
        local_id: OfflineActionId,
        account_id: AccountId,
        action_type: OfflineActionType,
        target_id: Option<EntityId>,
        payload: OfflinePayload,
        sync_status: SyncStatus,
        created_at: DateTime<Utc>,
        synced_at: Option<DateTime<Utc>>,
        remote_id: Option<RemoteEntityId>,
    ) -> Self {
        Self {
            record_id,
            local_id,
            account_id,
            action_type,
            target_id,
            payload,
            remote_id,
            sync_status,
            created_at,
            synced_at,
            error_message: None,
        }
    }

    pub fn with_error_message(mut self, message: Option<String>) -> Self {
        self.error_message = message;
        self
    }

    pub fn mark_synced(
        &mut self,
        synced_at: Option<DateTime<Utc>>,
        remote_id: Option<RemoteEntityId>,
    ) {
        self.sync_status = SyncStatus::Synced;
        self.synced_at = synced_at;
        self.remote_id = remote_id;
    }
}
