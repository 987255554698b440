use crate::support::{
    create_playlist_params, playlist_mutation_params, service_with_sink, setup_store,
    CapturingSink, ScriptedGateway,
};
use harmonia_offline::application::ports::notification::{NotificationSeverity, NotificationSink};
use harmonia_offline::application::ports::remote_gateway::{RemoteAck, RemoteCallError};
use harmonia_offline::application::services::offline_service::{
    OfflineActionsQuery, OfflineServiceTrait,
};
use harmonia_offline::domain::value_objects::RemoteEntityId;
use harmonia_offline::infrastructure::offline::ReplayJob;
use std::sync::Arc;

#[tokio::test]
async fn offline_create_playlist_then_replay_drains_queue() {
    let (persistence, _pool) = setup_store().await;
    let sink = CapturingSink::new();
    let service = service_with_sink(persistence.clone(), sink.clone());

    // オフライン中の作成はキューに1件積まれ、ユーザーへ通知される
    let saved = service
        .save_action(create_playlist_params("Road Trip"))
        .await
        .unwrap();
    assert_eq!(saved.action.action_type.as_str(), "create_playlist");

    let notices = sink.shown();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].1, NotificationSeverity::Info);

    let queued = service
        .list_actions(OfflineActionsQuery {
            include_synced: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(queued.len(), 1);

    // 接続復帰後のリプレイは成功し、キューが空になる
    let gateway = ScriptedGateway::new(vec![Ok(RemoteAck::with_remote_id(
        RemoteEntityId::parse("pl_77").unwrap(),
    ))]);
    let job = ReplayJob::with_notifier(
        persistence.clone(),
        gateway.clone(),
        Some(sink.clone() as Arc<dyn NotificationSink>),
    );

    let outcome = job.replay_once().await.unwrap();
    assert_eq!(outcome.succeeded.len(), 1);
    assert!(outcome.failed.is_empty());
    assert!(outcome.rejected.is_empty());

    let remaining = service
        .list_actions(OfflineActionsQuery {
            include_synced: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(remaining.is_empty());

    // 仮IDだったアクションに正式IDが載る
    let synced = service
        .list_actions(OfflineActionsQuery {
            include_synced: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        synced[0].remote_id.as_ref().map(|id| id.as_str()),
        Some("pl_77")
    );

    let replay_notices = sink.shown();
    assert_eq!(
        replay_notices.last().unwrap().1,
        NotificationSeverity::Success
    );
}

#[tokio::test]
async fn replay_keeps_insertion_order_and_continues_past_failures() {
    let (persistence, _pool) = setup_store().await;
    let sink = CapturingSink::new();
    let service = service_with_sink(persistence.clone(), sink.clone());

    service
        .save_action(create_playlist_params("A"))
        .await
        .unwrap();
    service
        .save_action(create_playlist_params("B"))
        .await
        .unwrap();
    service
        .save_action(create_playlist_params("C"))
        .await
        .unwrap();

    let gateway = ScriptedGateway::new(vec![
        Ok(RemoteAck::default()),
        Err(RemoteCallError::NetworkUnavailable("offline".into())),
        Ok(RemoteAck::default()),
    ]);
    let job = ReplayJob::with_notifier(
        persistence.clone(),
        gateway.clone(),
        Some(sink.clone() as Arc<dyn NotificationSink>),
    );

    let outcome = job.replay_once().await.unwrap();

    assert_eq!(gateway.calls(), vec!["A", "B", "C"]);
    assert_eq!(outcome.succeeded.len(), 2);
    assert_eq!(outcome.failed.len(), 1);

    let remaining = service
        .list_actions(OfflineActionsQuery {
            include_synced: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(
        remaining[0]
            .payload
            .as_object()
            .unwrap()
            .get("title")
            .unwrap(),
        "B"
    );

    // 部分的な成功は警告として通知される
    assert_eq!(
        sink.shown().last().unwrap().1,
        NotificationSeverity::Warning
    );
}

#[tokio::test]
async fn replaying_empty_queue_returns_empty_partition() {
    let (persistence, _pool) = setup_store().await;
    let gateway = ScriptedGateway::new(vec![]);
    let job = ReplayJob::new(persistence, gateway.clone());

    let outcome = job.replay_once().await.unwrap();

    assert!(outcome.succeeded.is_empty());
    assert!(outcome.failed.is_empty());
    assert!(outcome.rejected.is_empty());
    assert!(gateway.calls().is_empty());
}

// 既知の制限: 同一IDに対する update → delete は挿入順のまま両方リプレイされる。
// 依存関係の並べ替えや後勝ち統合は行わない。
#[tokio::test]
async fn update_then_delete_on_same_id_replays_in_insertion_order() {
    let (persistence, _pool) = setup_store().await;
    let sink = CapturingSink::new();
    let service = service_with_sink(persistence.clone(), sink);

    service
        .save_action(playlist_mutation_params(
            "update_playlist",
            "p1",
            r#"{"id":"p1","name":"X","songIds":[1,2]}"#,
        ))
        .await
        .unwrap();
    service
        .save_action(playlist_mutation_params(
            "delete_playlist",
            "p1",
            r#"{"id":"p1"}"#,
        ))
        .await
        .unwrap();

    let gateway = ScriptedGateway::new(vec![Ok(RemoteAck::default()), Ok(RemoteAck::default())]);
    let job = ReplayJob::new(persistence, gateway.clone());

    let outcome = job.replay_once().await.unwrap();

    assert_eq!(outcome.succeeded.len(), 2);
    assert_eq!(gateway.calls(), vec!["update_playlist", "delete_playlist"]);
}
