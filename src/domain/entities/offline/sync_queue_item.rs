use crate::domain::value_objects::{
    OfflineActionId, OfflineActionType, OfflinePayload, SyncQueueId, SyncQueueStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncQueueItem {
    pub id: SyncQueueId,
    /// 由来するオフラインアクションの `local_id`。単独投入されたキュー項目では `None`。
    pub local_id: Option<OfflineActionId>,
    pub action_type: OfflineActionType,
    pub payload: OfflinePayload,
    pub status: SyncQueueStatus,
    pub retry_count: u32,
    pub max_retries: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl SyncQueueItem {
    pub fn retries_exhausted(&self) -> bool {
        self.retry_count >= self.max_retries
    }
}
