use crate::support::{
    create_playlist_params, service_with_sink, setup_store, CapturingSink, ScriptedGateway,
};
use harmonia_offline::application::ports::remote_gateway::{RemoteAck, RemoteCallError};
use harmonia_offline::application::services::offline_service::{
    OfflineActionsQuery, OfflineServiceTrait,
};
use harmonia_offline::infrastructure::offline::ReplayJob;
use std::time::Duration;

#[tokio::test]
async fn auth_expiry_keeps_action_queued_until_token_refresh() {
    let (persistence, _pool) = setup_store().await;
    let sink = CapturingSink::new();
    let service = service_with_sink(persistence.clone(), sink);

    service
        .save_action(create_playlist_params("Gym Mix"))
        .await
        .unwrap();

    // 1回目: トークン切れでリプレイ失敗、アクションはキューに残る
    let gateway = ScriptedGateway::new(vec![Err(RemoteCallError::AuthExpired(
        "token expired".into(),
    ))]);
    let job = ReplayJob::new(persistence.clone(), gateway);

    let first = job.replay_once().await.unwrap();
    assert_eq!(first.failed.len(), 1);

    let still_queued = service
        .list_actions(OfflineActionsQuery {
            include_synced: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(still_queued.len(), 1);

    // 2回目: 資格情報が更新された想定でリプレイ成功
    let refreshed_gateway = ScriptedGateway::new(vec![Ok(RemoteAck::default())]);
    let refreshed_job = ReplayJob::new(persistence.clone(), refreshed_gateway);

    let second = refreshed_job.replay_once().await.unwrap();
    assert_eq!(second.succeeded.len(), 1);

    let drained = service
        .list_actions(OfflineActionsQuery {
            include_synced: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(drained.is_empty());
}

#[tokio::test]
async fn requeue_restores_queue_entries_lost_before_replay() {
    let (persistence, pool) = setup_store().await;
    let sink = CapturingSink::new();
    let service = service_with_sink(persistence.clone(), sink);

    service
        .save_action(create_playlist_params("Lost"))
        .await
        .unwrap();

    // キュー行だけが消えた（クラッシュ相当）状態を作る
    sqlx::query("DELETE FROM sync_queue")
        .execute(&pool)
        .await
        .unwrap();

    let gateway = ScriptedGateway::new(vec![Ok(RemoteAck::default())]);
    let job = ReplayJob::new(persistence.clone(), gateway);

    let report = job.requeue_once().await.unwrap();
    assert_eq!(report.requeued_count, 1);
    assert_eq!(report.pending_queue_count, 1);

    let outcome = job.replay_once().await.unwrap();
    assert_eq!(outcome.succeeded.len(), 1);

    let drained = service
        .list_actions(OfflineActionsQuery {
            include_synced: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(drained.is_empty());
}

#[tokio::test]
async fn concurrent_replay_triggers_do_not_double_submit() {
    let (persistence, _pool) = setup_store().await;
    let sink = CapturingSink::new();
    let service = service_with_sink(persistence.clone(), sink);

    service
        .save_action(create_playlist_params("Solo"))
        .await
        .unwrap();

    let gateway = ScriptedGateway::with_delay(
        vec![Ok(RemoteAck::default())],
        Duration::from_millis(50),
    );
    let job = ReplayJob::new(persistence, gateway.clone());

    // 手動の「同期」と接続復帰トリガーが競合した想定で同時に2回起動する
    let (first, second) = tokio::join!(job.replay_once(), job.replay_once());

    let first = first.unwrap();
    let second = second.unwrap();

    assert_eq!(gateway.calls().len(), 1);
    assert_eq!(first.succeeded.len() + second.succeeded.len(), 1);
}
