use crate::application::ports::remote_gateway::{RemoteAck, RemoteCallError, RemoteGateway};
use crate::application::services::offline_service::{OfflineServiceTrait, SaveOfflineActionParams};
use crate::domain::entities::offline::SavedOfflineAction;
use crate::shared::error::AppError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FallbackError {
    /// 呼び出しは失敗したが、アクションはキューに退避済み。元のエラーを保持する。
    #[error("{cause}")]
    Deferred {
        cause: RemoteCallError,
        queued: Box<SavedOfflineAction>,
    },

    /// リモートに拒否された。リトライしても成功しないためキューには入れない。
    #[error(transparent)]
    Remote(RemoteCallError),

    /// キュー退避そのものが失敗した。呼び出し元へそのまま伝播する。
    #[error(transparent)]
    Storage(AppError),
}

impl FallbackError {
    pub fn queued_action(&self) -> Option<&SavedOfflineAction> {
        match self {
            FallbackError::Deferred { queued, .. } => Some(queued),
            _ => None,
        }
    }
}

/// 各API呼び出し箇所に散らばっていた「失敗したら退避」の制御フローをまとめた共通ラッパー。
pub struct OfflineFallback {
    gateway: Arc<dyn RemoteGateway>,
    offline: Arc<dyn OfflineServiceTrait>,
}

impl OfflineFallback {
    pub fn new(gateway: Arc<dyn RemoteGateway>, offline: Arc<dyn OfflineServiceTrait>) -> Self {
        Self { gateway, offline }
    }

    /// リモート操作を試行し、オフライン・認証切れのときだけキューへ退避する。
    pub async fn run(&self, params: SaveOfflineActionParams) -> Result<RemoteAck, FallbackError> {
        match self
            .gateway
            .apply(&params.action_type, &params.payload)
            .await
        {
            Ok(ack) => Ok(ack),
            Err(cause) if cause.is_retryable() => {
                tracing::info!(
                    target: "offline::fallback",
                    action_type = %params.action_type,
                    error = %cause,
                    "remote call failed, deferring action to offline queue"
                );
                let queued = self
                    .offline
                    .save_action(params)
                    .await
                    .map_err(FallbackError::Storage)?;
                Err(FallbackError::Deferred {
                    cause,
                    queued: Box::new(queued),
                })
            }
            Err(cause) => Err(FallbackError::Remote(cause)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::offline_store::OfflinePersistence;
    use crate::application::services::offline_service::{OfflineService, OfflineActionsQuery};
    use crate::domain::value_objects::{AccountId, OfflineActionType, OfflinePayload, RemoteEntityId};
    use async_trait::async_trait;
    use crate::infrastructure::offline::SqliteOfflinePersistence;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedGateway {
        responses: Mutex<VecDeque<Result<RemoteAck, RemoteCallError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<Result<RemoteAck, RemoteCallError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RemoteGateway for ScriptedGateway {
        async fn apply(
            &self,
            action_type: &OfflineActionType,
            _payload: &OfflinePayload,
        ) -> Result<RemoteAck, RemoteCallError> {
            self.calls.lock().unwrap().push(action_type.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(RemoteAck::default()))
        }
    }

    async fn setup_offline() -> Arc<dyn OfflineServiceTrait> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        let persistence: Arc<dyn OfflinePersistence> =
            Arc::new(SqliteOfflinePersistence::new(pool));
        Arc::new(OfflineService::new(persistence))
    }

    fn create_playlist_params() -> SaveOfflineActionParams {
        SaveOfflineActionParams {
            account_id: AccountId::parse("acct_1").unwrap(),
            action_type: OfflineActionType::new("create_playlist".into()).unwrap(),
            target_id: None,
            payload: OfflinePayload::from_json_str(r#"{"title":"Road Trip"}"#).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_success_passes_ack_through_without_queueing() {
        let offline = setup_offline().await;
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(RemoteAck::with_remote_id(
            RemoteEntityId::parse("pl_42").unwrap(),
        ))]));
        let fallback = OfflineFallback::new(gateway.clone(), offline.clone());

        let ack = fallback.run(create_playlist_params()).await.unwrap();
        assert_eq!(ack.remote_id.unwrap().as_str(), "pl_42");

        let queued = offline
            .list_actions(OfflineActionsQuery::default())
            .await
            .unwrap();
        assert!(queued.is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_queues_and_preserves_original_error() {
        let offline = setup_offline().await;
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(
            RemoteCallError::NetworkUnavailable("connection refused".into()),
        )]));
        let fallback = OfflineFallback::new(gateway.clone(), offline.clone());

        let err = fallback.run(create_playlist_params()).await.unwrap_err();
        match &err {
            FallbackError::Deferred { cause, queued } => {
                assert!(matches!(cause, RemoteCallError::NetworkUnavailable(_)));
                assert_eq!(queued.action.action_type.as_str(), "create_playlist");
            }
            other => panic!("expected deferred error, got {other:?}"),
        }
        assert!(err.queued_action().is_some());

        let queued = offline
            .list_actions(OfflineActionsQuery::default())
            .await
            .unwrap();
        assert_eq!(queued.len(), 1);
    }

    #[tokio::test]
    async fn test_auth_expiry_queues_like_network_failure() {
        let offline = setup_offline().await;
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(
            RemoteCallError::AuthExpired("token expired".into()),
        )]));
        let fallback = OfflineFallback::new(gateway, offline.clone());

        let err = fallback.run(create_playlist_params()).await.unwrap_err();
        assert!(matches!(err, FallbackError::Deferred { .. }));
    }

    #[tokio::test]
    async fn test_remote_rejection_is_not_queued() {
        let offline = setup_offline().await;
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(
            RemoteCallError::RemoteRejected {
                status: 409,
                message: "playlist already exists".into(),
            },
        )]));
        let fallback = OfflineFallback::new(gateway.clone(), offline.clone());

        let err = fallback.run(create_playlist_params()).await.unwrap_err();
        assert!(matches!(err, FallbackError::Remote(_)));
        assert_eq!(gateway.call_count(), 1);

        let queued = offline
            .list_actions(OfflineActionsQuery::default())
            .await
            .unwrap();
        assert!(queued.is_empty());
    }
}
