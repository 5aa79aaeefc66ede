//! Integration tests for the status API handlers

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use common::fixtures::*;
use validator_monitor::chain::BlockOutcome;
use validator_monitor::config::Config;
use validator_monitor::dashboard::{DashboardPublisher, StatusSnapshot};
use validator_monitor::web::{create_router, AppState};

fn snapshot(name: &str, height: i64) -> StatusSnapshot {
    StatusSnapshot {
        msg_type: "status".to_string(),
        name: name.to_string(),
        chain_id: CHAIN_ID.to_string(),
        moniker: "my-validator".to_string(),
        bonded: true,
        jailed: false,
        tombstoned: false,
        missed: 1,
        window: 100,
        nodes: 2,
        healthy_nodes: 1,
        active_alerts: 0,
        height,
        last_error: String::new(),
        blocks: vec![BlockOutcome::Signed, BlockOutcome::Missed, BlockOutcome::Unknown],
    }
}

async fn state_with(snapshots: Vec<StatusSnapshot>) -> AppState {
    let publisher = DashboardPublisher::new(None).unwrap();
    for snapshot in snapshots {
        publisher.handle(snapshot).await;
    }
    AppState::new(Arc::new(Config::default()), publisher)
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
    let response = create_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_all_status_lists_chains_sorted() {
    let state = state_with(vec![snapshot("zeta", 7), snapshot("alpha", 3)]).await;

    let (status, body) = get(state, "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[tokio::test]
async fn test_chain_status_returns_latest_snapshot() {
    let state = state_with(vec![snapshot("gno", 10), snapshot("gno", 11)]).await;

    let (status, body) = get(state, "/api/status/gno").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["height"], 11);
    assert_eq!(body["data"]["moniker"], "my-validator");
    assert_eq!(body["data"]["blocks"], serde_json::json!([3, 0, -1]));
}

#[tokio::test]
async fn test_unknown_chain_is_not_found() {
    let state = state_with(Vec::new()).await;

    let (status, body) = get(state, "/api/status/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No status available for chain missing");
}

#[tokio::test]
async fn test_service_health_counts_reporting_chains() {
    let state = state_with(vec![snapshot("gno", 1)]).await;

    let (status, body) = get(state, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["chains_configured"], 0);
    assert_eq!(body["data"]["chains_reporting"], 1);
}
