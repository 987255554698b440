use super::SyncQueueItem;
use serde::{Deserialize, Serialize};

/// 1回のリプレイパスの結果。成功分は完了済み、失敗分はキューに残る。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReplayOutcome {
    pub succeeded: Vec<SyncQueueItem>,
    pub failed: Vec<SyncQueueItem>,
    /// 恒久拒否された項目。リトライされない。
    pub rejected: Vec<SyncQueueItem>,
}

impl ReplayOutcome {
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty() && self.rejected.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len() + self.rejected.len()
    }
}
