use async_trait::async_trait;
use harmonia_offline::application::ports::notification::{NotificationSeverity, NotificationSink};
use harmonia_offline::application::ports::offline_store::OfflinePersistence;
use harmonia_offline::application::services::offline_service::{
    OfflineService, SaveOfflineActionParams,
};
use harmonia_offline::application::ports::remote_gateway::{
    RemoteAck, RemoteCallError, RemoteGateway,
};
use harmonia_offline::domain::value_objects::{
    AccountId, EntityId, OfflineActionType, OfflinePayload,
};
use harmonia_offline::infrastructure::offline::SqliteOfflinePersistence;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ACCOUNT: &str = "acct_9f2c";

pub async fn setup_store() -> (Arc<SqliteOfflinePersistence>, Pool<Sqlite>) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("offline schema");

    (Arc::new(SqliteOfflinePersistence::new(pool.clone())), pool)
}

pub fn service_with_sink(
    persistence: Arc<dyn OfflinePersistence>,
    sink: Arc<CapturingSink>,
) -> Arc<OfflineService> {
    Arc::new(OfflineService::new(persistence).with_notifier(sink))
}

pub fn create_playlist_params(title: &str) -> SaveOfflineActionParams {
    SaveOfflineActionParams {
        account_id: AccountId::parse(ACCOUNT).unwrap(),
        action_type: OfflineActionType::new("create_playlist".into()).unwrap(),
        target_id: None,
        payload: OfflinePayload::from_json_str(&format!("{{\"title\":\"{title}\"}}")).unwrap(),
    }
}

pub fn playlist_mutation_params(
    action_type: &str,
    playlist_id: &str,
    payload: &str,
) -> SaveOfflineActionParams {
    SaveOfflineActionParams {
        account_id: AccountId::parse(ACCOUNT).unwrap(),
        action_type: OfflineActionType::new(action_type.into()).unwrap(),
        target_id: Some(EntityId::parse(playlist_id).unwrap()),
        payload: OfflinePayload::from_json_str(payload).unwrap(),
    }
}

/// 応答を事前に並べておくテスト用ゲートウェイ。呼び出し順を記録する。
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<RemoteAck, RemoteCallError>>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<Result<RemoteAck, RemoteCallError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        })
    }

    pub fn with_delay(
        responses: Vec<Result<RemoteAck, RemoteCallError>>,
        delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            delay: Some(delay),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteGateway for ScriptedGateway {
    async fn apply(
        &self,
        action_type: &OfflineActionType,
        payload: &OfflinePayload,
    ) -> Result<RemoteAck, RemoteCallError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let label = payload
            .as_object()
            .and_then(|map| map.get("title"))
            .and_then(|value| value.as_str())
            .map(ToString::to_string)
            .unwrap_or_else(|| action_type.to_string());
        self.calls.lock().unwrap().push(label);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RemoteAck::default()))
    }
}

/// 発行された通知を記録するシンク。
#[derive(Default)]
pub struct CapturingSink {
    shown: Mutex<Vec<(String, NotificationSeverity)>>,
}

impl CapturingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shown(&self) -> Vec<(String, NotificationSeverity)> {
        self.shown.lock().unwrap().clone()
    }
}

impl NotificationSink for CapturingSink {
    fn show(&self, message: &str, severity: NotificationSeverity) -> Result<(), String> {
        self.shown
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
        Ok(())
    }
}
