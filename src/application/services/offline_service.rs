use crate::application::ports::notification::{NotificationSeverity, NotificationSink};
use crate::application::ports::offline_store::OfflinePersistence;
use crate::domain::entities::offline::{
    CacheMetadataUpdate, CacheStatusSnapshot, ClearScope, OfflineActionDraft, OfflineActionFilter,
    OfflineActionRecord, OptimisticUpdateDraft, SavedOfflineAction, SyncStatusRecord,
    SyncStatusUpdate,
};
use crate::domain::value_objects::{
    AccountId, EntityId, OfflineActionType, OfflinePayload, OptimisticUpdateId,
};
use crate::shared::config::SyncConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;

const OFFLINE_NOTICE: &str = "You're offline. Changes will sync when the connection is back.";

#[derive(Debug, Clone)]
pub struct SaveOfflineActionParams {
    pub account_id: AccountId,
    pub action_type: OfflineActionType,
    pub target_id: Option<EntityId>,
    pub payload: OfflinePayload,
}

#[derive(Debug, Clone, Default)]
pub struct OfflineActionsQuery {
    pub account_id: Option<AccountId>,
    pub include_synced: Option<bool>,
    pub limit: Option<u32>,
}

#[async_trait]
pub trait OfflineServiceTrait: Send + Sync {
    async fn save_action(
        &self,
        params: SaveOfflineActionParams,
    ) -> Result<SavedOfflineAction, AppError>;
    async fn list_actions(
        &self,
        query: OfflineActionsQuery,
    ) -> Result<Vec<OfflineActionRecord>, AppError>;
    async fn clear_actions(&self, scope: ClearScope) -> Result<u64, AppError>;
    async fn cache_status(&self) -> Result<CacheStatusSnapshot, AppError>;
    async fn upsert_cache_metadata(&self, update: CacheMetadataUpdate) -> Result<(), AppError>;
    async fn cleanup_expired_cache(&self) -> Result<u32, AppError>;
    async fn save_optimistic_update(
        &self,
        draft: OptimisticUpdateDraft,
    ) -> Result<OptimisticUpdateId, AppError>;
    async fn confirm_optimistic_update(
        &self,
        update_id: OptimisticUpdateId,
    ) -> Result<(), AppError>;
    async fn rollback_optimistic_update(
        &self,
        update_id: OptimisticUpdateId,
    ) -> Result<Option<OfflinePayload>, AppError>;
    async fn update_sync_status(&self, update: SyncStatusUpdate) -> Result<(), AppError>;
    async fn sync_conflicts(&self) -> Result<Vec<SyncStatusRecord>, AppError>;
}

pub struct OfflineService {
    persistence: Arc<dyn OfflinePersistence>,
    notifier: Option<Arc<dyn NotificationSink>>,
    max_retries: u32,
}

impl OfflineService {
    pub fn new(persistence: Arc<dyn OfflinePersistence>) -> Self {
        Self {
            persistence,
            notifier: None,
            max_retries: SyncConfig::default().max_retries,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_sync_config(mut self, config: &SyncConfig) -> Self {
        self.max_retries = config.max_retries;
        self
    }

    fn build_action_draft(
        &self,
        params: &SaveOfflineActionParams,
    ) -> Result<OfflineActionDraft, AppError> {
        if params.payload.as_object().is_none() {
            return Err(AppError::ValidationError(
                "Offline action payload must be a JSON object".to_string(),
            ));
        }

        Ok(OfflineActionDraft::new(
            params.account_id.clone(),
            params.action_type.clone(),
            params.target_id.clone(),
            params.payload.clone(),
            self.max_retries,
        ))
    }

    fn filter_from_query(query: &OfflineActionsQuery) -> OfflineActionFilter {
        OfflineActionFilter::new(query.account_id.clone(), query.include_synced, query.limit)
    }

    fn notify(&self, message: &str, severity: NotificationSeverity) {
        if let Some(notifier) = &self.notifier {
            if let Err(err) = notifier.show(message, severity) {
                tracing::warn!(
                    target: "offline::notify",
                    error = %err,
                    "failed to show offline notification"
                );
            }
        }
    }
}

#[async_trait]
impl OfflineServiceTrait for OfflineService {
    async fn save_action(
        &self,
        params: SaveOfflineActionParams,
    ) -> Result<SavedOfflineAction, AppError> {
        let draft = self.build_action_draft(&params)?;
        let saved = self.persistence.save_action(draft).await?;
        self.notify(OFFLINE_NOTICE, NotificationSeverity::Info);
        Ok(saved)
    }

    async fn list_actions(
        &self,
        query: OfflineActionsQuery,
    ) -> Result<Vec<OfflineActionRecord>, AppError> {
        let filter = Self::filter_from_query(&query);
        self.persistence.list_actions(filter).await
    }

    async fn clear_actions(&self, scope: ClearScope) -> Result<u64, AppError> {
        self.persistence.clear_actions(scope).await
    }

    async fn cache_status(&self) -> Result<CacheStatusSnapshot, AppError> {
        self.persistence.cache_status().await
    }

    async fn upsert_cache_metadata(&self, update: CacheMetadataUpdate) -> Result<(), AppError> {
        self.persistence.upsert_cache_metadata(update).await
    }

    async fn cleanup_expired_cache(&self) -> Result<u32, AppError> {
        self.persistence.cleanup_expired_cache().await
    }

    async fn save_optimistic_update(
        &self,
        draft: OptimisticUpdateDraft,
    ) -> Result<OptimisticUpdateId, AppError> {
        self.persistence.save_optimistic_update(draft).await
    }

    async fn confirm_optimistic_update(
        &self,
        update_id: OptimisticUpdateId,
    ) -> Result<(), AppError> {
        self.persistence.confirm_optimistic_update(update_id).await
    }

    async fn rollback_optimistic_update(
        &self,
        update_id: OptimisticUpdateId,
    ) -> Result<Option<OfflinePayload>, AppError> {
        self.persistence.rollback_optimistic_update(update_id).await
    }

    async fn update_sync_status(&self, update: SyncStatusUpdate) -> Result<(), AppError> {
        self.persistence.update_sync_status(update).await
    }

    async fn sync_conflicts(&self) -> Result<Vec<SyncStatusRecord>, AppError> {
        self.persistence.sync_conflicts().await
    }
}
