use crate::application::ports::notification::{NotificationSeverity, NotificationSink};
use crate::application::ports::offline_store::OfflinePersistence;
use crate::application::ports::remote_gateway::RemoteGateway;
use crate::domain::entities::offline::{OfflineActionFilter, ReplayOutcome};
use crate::infrastructure::offline::metrics;
use crate::shared::error::AppError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConflictDigest {
    pub entity_type: String,
    pub entity_id: String,
    pub sync_status: String,
}

/// `requeue_once` の実行結果。クラッシュ等でキュー項目を失ったアクションの復旧状況を表す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineRequeueReport {
    pub offline_action_count: usize,
    pub requeued_count: usize,
    pub pending_queue_count: usize,
    pub stale_cache_keys: Vec<String>,
    pub unconfirmed_update_ids: Vec<String>,
    pub sync_conflicts: Vec<SyncConflictDigest>,
    pub emitted_at: i64,
}

pub struct ReplayJob {
    persistence: Arc<dyn OfflinePersistence>,
    gateway: Arc<dyn RemoteGateway>,
    notifier: Option<Arc<dyn NotificationSink>>,
    gate: Mutex<()>,
}

impl ReplayJob {
    pub fn new(
        persistence: Arc<dyn OfflinePersistence>,
        gateway: Arc<dyn RemoteGateway>,
    ) -> Arc<Self> {
        Self::with_notifier(persistence, gateway, None)
    }

    pub fn with_notifier(
        persistence: Arc<dyn OfflinePersistence>,
        gateway: Arc<dyn RemoteGateway>,
        notifier: Option<Arc<dyn NotificationSink>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            persistence,
            gateway,
            notifier,
            gate: Mutex::new(()),
        })
    }

    /// 接続復帰シグナルや手動の「同期」操作から呼ぶ非同期トリガー。
    pub fn trigger(self: &Arc<Self>) {
        let job = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = job.replay_once().await {
                tracing::error!(
                    target: "offline::replay",
                    error = %err,
                    "offline replay pass failed"
                );
                job.notify(
                    "Sync failed. Queued changes will be retried later.",
                    NotificationSeverity::Error,
                );
            }
        });
    }

    /// キューを挿入順に1周リプレイする。ゲートで直列化されるため
    /// 二重起動しても同じアクションが二重送信されることはない。
    pub async fn replay_once(&self) -> Result<ReplayOutcome, AppError> {
        let _guard = self.gate.lock().await;
        let started = Instant::now();

        let items = self.persistence.pending_sync_items().await?;
        if items.is_empty() {
            return Ok(ReplayOutcome::default());
        }

        let mut outcome = ReplayOutcome::default();

        for item in items {
            match self.gateway.apply(&item.action_type, &item.payload).await {
                Ok(ack) => {
                    let synced_at = Utc::now();
                    self.persistence.complete_queue_item(item.id, synced_at).await?;

                    if let Some(local_id) = &item.local_id {
                        self.persistence
                            .mark_action_synced(local_id, ack.remote_id.clone(), synced_at)
                            .await?;

                        if let Some(action) = self.persistence.find_action(local_id).await? {
                            if let Some(target_id) = &action.target_id {
                                self.persistence
                                    .confirm_optimistic_updates_for_entity(target_id)
                                    .await?;
                            }
                        }
                    }

                    outcome.succeeded.push(item);
                }
                Err(err) if err.is_retryable() => {
                    self.persistence
                        .record_queue_failure(item.id, &err.to_string())
                        .await?;
                    tracing::warn!(
                        target: "offline::replay",
                        action_type = %item.action_type,
                        retry_count = item.retry_count + 1,
                        max_retries = item.max_retries,
                        error = %err,
                        "queued action failed, will retry on a later pass"
                    );
                    outcome.failed.push(item);
                }
                Err(err) => {
                    self.persistence
                        .reject_queue_item(item.id, &err.to_string())
                        .await?;
                    tracing::warn!(
                        target: "offline::replay",
                        action_type = %item.action_type,
                        error = %err,
                        "queued action permanently rejected by remote"
                    );
                    outcome.rejected.push(item);
                }
            }
        }

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        metrics::record_replay_pass(&outcome, duration_ms);
        self.report(&outcome);

        Ok(outcome)
    }

    /// 未同期アクションのうちキュー項目を失っているものを再投入する（復旧パス）。
    pub async fn requeue_once(&self) -> Result<OfflineRequeueReport, AppError> {
        let unsynced = self
            .persistence
            .list_actions(OfflineActionFilter::new(None, Some(false), None))
            .await?;

        let mut requeued_count = 0usize;
        for action in &unsynced {
            if self.persistence.enqueue_if_missing(action).await? {
                requeued_count += 1;
            }
        }

        let pending_queue = self.persistence.pending_sync_items().await?;
        let stale_cache = self.persistence.stale_cache_entries().await?;
        let unconfirmed = self.persistence.unconfirmed_updates().await?;
        let conflicts = self.persistence.sync_conflicts().await?;

        let report = OfflineRequeueReport {
            offline_action_count: unsynced.len(),
            requeued_count,
            pending_queue_count: pending_queue.len(),
            stale_cache_keys: stale_cache
                .into_iter()
                .map(|entry| entry.cache_key.to_string())
                .collect(),
            unconfirmed_update_ids: unconfirmed
                .into_iter()
                .map(|update| update.update_id.to_string())
                .collect(),
            sync_conflicts: conflicts
                .into_iter()
                .map(|record| SyncConflictDigest {
                    entity_type: record.entity_type.to_string(),
                    entity_id: record.entity_id.to_string(),
                    sync_status: record.sync_status.as_str().to_string(),
                })
                .collect(),
            emitted_at: Utc::now().timestamp_millis(),
        };

        tracing::info!(
            target: "offline::replay",
            requeued = report.requeued_count,
            pending = report.pending_queue_count,
            "offline requeue pass completed"
        );

        Ok(report)
    }

    fn report(&self, outcome: &ReplayOutcome) {
        tracing::info!(
            target: "offline::replay",
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            rejected = outcome.rejected.len(),
            "offline replay pass completed"
        );

        if outcome.failed.is_empty() && outcome.rejected.is_empty() {
            self.notify(
                &format!("Synced {} queued change(s).", outcome.succeeded.len()),
                NotificationSeverity::Success,
            );
        } else {
            self.notify(
                &format!(
                    "Synced {} of {} queued change(s); the rest will be retried.",
                    outcome.succeeded.len(),
                    outcome.attempted()
                ),
                NotificationSeverity::Warning,
            );
        }
    }

    fn notify(&self, message: &str, severity: NotificationSeverity) {
        if let Some(notifier) = &self.notifier {
            if let Err(err) = notifier.show(message, severity) {
                tracing::warn!(
                    target: "offline::replay",
                    error = %err,
                    "failed to emit replay notification"
                );
            }
        }
    }
}
