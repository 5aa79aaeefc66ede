//! Integration tests for snapshot delivery to the dashboard webhook

mod common;

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::fixtures::*;
use validator_monitor::chain::BlockOutcome;
use validator_monitor::dashboard::{self, DashboardPublisher, StatusSnapshot};

fn snapshot(height: i64) -> StatusSnapshot {
    StatusSnapshot {
        msg_type: "status".to_string(),
        name: "gno".to_string(),
        chain_id: CHAIN_ID.to_string(),
        moniker: VALIDATOR.to_string(),
        bonded: true,
        jailed: false,
        tombstoned: false,
        missed: 0,
        window: 100,
        nodes: 1,
        healthy_nodes: 1,
        active_alerts: 0,
        height,
        last_error: String::new(),
        blocks: vec![BlockOutcome::Signed],
    }
}

#[tokio::test]
async fn test_snapshot_is_posted_to_webhook() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dashboard"))
        .and(body_partial_json(serde_json::json!({
            "msg_type": "status",
            "name": "gno",
            "height": 12,
            "blocks": [3]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&webhook)
        .await;

    let publisher = DashboardPublisher::new(Some(format!("{}/dashboard", webhook.uri()))).unwrap();
    publisher.handle(snapshot(12)).await;

    assert_eq!(publisher.latest_for("gno").await.unwrap().height, 12);
}

#[tokio::test]
async fn test_webhook_failure_still_keeps_latest() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&webhook)
        .await;

    let publisher = DashboardPublisher::new(Some(webhook.uri())).unwrap();
    publisher.handle(snapshot(3)).await;

    assert_eq!(publisher.latest().await.len(), 1);
}

#[tokio::test]
async fn test_run_drains_channel_until_senders_drop() {
    let publisher = DashboardPublisher::new(Some(String::new())).unwrap();
    let (sender, rx) = dashboard::channel(4);

    let task = tokio::spawn(publisher.clone().run(rx, CancellationToken::new()));

    assert!(sender.publish(snapshot(1)));
    assert!(sender.publish(snapshot(2)));
    drop(sender);

    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("publisher did not stop when senders dropped")
        .unwrap();

    assert_eq!(publisher.latest_for("gno").await.unwrap().height, 2);
}
