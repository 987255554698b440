use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncQueueStatus {
    Pending,
    Processing,
    Failed,
    /// リモートに恒久的に拒否された。リトライ対象外。
    Rejected,
    Completed,
    Unknown(String),
}

impl SyncQueueStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SyncQueueStatus::Pending => "pending",
            SyncQueueStatus::Processing => "processing",
            SyncQueueStatus::Failed => "failed",
            SyncQueueStatus::Rejected => "rejected",
            SyncQueueStatus::Completed => "completed",
            SyncQueueStatus::Unknown(value) => value.as_str(),
        }
    }

    /// リプレイの対象となる状態か。
    pub fn is_replayable(&self) -> bool {
        matches!(self, SyncQueueStatus::Pending | SyncQueueStatus::Failed)
    }
}

impl From<&str> for SyncQueueStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => SyncQueueStatus::Pending,
            "processing" => SyncQueueStatus::Processing,
            "failed" => SyncQueueStatus::Failed,
            "rejected" => SyncQueueStatus::Rejected,
            "completed" => SyncQueueStatus::Completed,
            other => SyncQueueStatus::Unknown(other.to_string()),
        }
    }
}
