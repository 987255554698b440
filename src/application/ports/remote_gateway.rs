use crate::domain::value_objects::{OfflineActionType, OfflinePayload, RemoteEntityId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// リモート呼び出しの失敗分類。`NetworkUnavailable` と `AuthExpired` のみキュー投入の対象。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteCallError {
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("Authentication expired: {0}")]
    AuthExpired(String),

    #[error("Remote rejected request ({status}): {message}")]
    RemoteRejected { status: u16, message: String },

    #[error("Unsupported offline action type: {0}")]
    UnsupportedAction(String),

    #[error("Invalid payload for {action}: {reason}")]
    InvalidPayload { action: String, reason: String },
}

impl RemoteCallError {
    /// 後で再試行して成功しうる失敗か。
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RemoteCallError::NetworkUnavailable(_) | RemoteCallError::AuthExpired(_)
        )
    }
}

/// リモート呼び出し成功時の応答。作成系では正式IDを運ぶ。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RemoteAck {
    pub remote_id: Option<RemoteEntityId>,
}

impl RemoteAck {
    pub fn with_remote_id(remote_id: RemoteEntityId) -> Self {
        Self {
            remote_id: Some(remote_id),
        }
    }
}

/// `(action_type, payload)` をリモート呼び出しへ対応付けるポート。
/// 呼び出し先のエンドポイントとペイロードの解釈は実装側が所有する。
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn apply(
        &self,
        action_type: &OfflineActionType,
        payload: &OfflinePayload,
    ) -> Result<RemoteAck, RemoteCallError>;
}
