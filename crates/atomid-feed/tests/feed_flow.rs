//! feed_flow.rs
//!
//! Runs the feed client and poller against an in-process server that speaks
//! the same query dialect as the hosted store and serves the fixtures under
//! `tests/fixtures`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use atomid_feed::{FeedClient, FeedConfig, FeedError, LogLevel, Poller};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

const KEY: &str = "anon-test-key";

#[derive(Default)]
struct Backend {
    hits: AtomicUsize,
    fail_logs: AtomicBool,
}

type Shared = Arc<Backend>;

fn fixture(name: &str) -> Value {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    apikey == Some(KEY) && bearer == Some(format!("Bearer {KEY}").as_str())
}

async fn stats(
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let rows = fixture("stats.json");
    let wanted = q.get("id").and_then(|v| v.strip_prefix("eq.")).unwrap_or_default().to_string();
    let filtered: Vec<Value> = rows
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["id"] == wanted.as_str())
        .cloned()
        .collect();
    Ok(Json(Value::Array(filtered)))
}

async fn logs(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    if backend.fail_logs.load(Ordering::SeqCst) {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    assert_eq!(q.get("order").map(String::as_str), Some("timestamp.desc"));
    let limit: usize = q.get("limit").and_then(|l| l.parse().ok()).unwrap_or(usize::MAX);
    let rows: Vec<Value> = fixture("logs.json").as_array().unwrap().iter().take(limit).cloned().collect();
    Ok(Json(Value::Array(rows)))
}

async fn serve(backend: Shared) -> String {
    let app = Router::new()
        .route("/rest/v1/fee_collector_stats", get(stats))
        .route("/rest/v1/collector_logs", get(logs))
        .with_state(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn snapshot_reads_stats_and_logs() {
    let base = serve(Shared::default()).await;
    let client = FeedClient::new(FeedConfig::new(base, KEY)).unwrap();

    let snap = client.snapshot(200).await.unwrap();
    let stats = snap.stats.as_ref().expect("stats row");
    assert_eq!(atomid_core::amount::format_sol(stats.total_sol_paid), "12.345678901");
    assert!(stats.last_payout_at.is_some());

    assert_eq!(snap.logs.len(), 3);
    let ids: Vec<i64> = snap.logs.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![43, 42, 41]);
    assert_eq!(snap.logs[0].level, LogLevel::Success);
    assert!(snap.logs[0].signature().is_some());
    assert_eq!(snap.paid_in_window(), 0.25);
}

#[tokio::test]
async fn log_limit_is_forwarded() {
    let base = serve(Shared::default()).await;
    let client = FeedClient::new(FeedConfig::new(base, KEY)).unwrap();
    assert_eq!(client.fetch_logs(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn missing_stats_row_is_none() {
    let base = serve(Shared::default()).await;
    let mut cfg = FeedConfig::new(base, KEY);
    cfg.stats_row_id = uuid::Uuid::from_u128(2);
    let client = FeedClient::new(cfg).unwrap();
    assert!(client.fetch_stats().await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_key_is_a_status_error() {
    let base = serve(Shared::default()).await;
    let client = FeedClient::new(FeedConfig::new(base, "other-key")).unwrap();
    match client.fetch_stats().await {
        Err(FeedError::Status { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected 401, got {other:?}"),
    }
}

#[tokio::test]
async fn poller_refreshes_until_shutdown() {
    let backend = Shared::default();
    let base = serve(backend.clone()).await;
    let client = FeedClient::new(FeedConfig::new(base, KEY)).unwrap();
    let poller = Poller::new(client).with_interval(Duration::from_millis(40));

    let mut seen = 0usize;
    let last = poller
        .run(|_| seen += 1, tokio::time::sleep(Duration::from_millis(190)))
        .await;

    assert!(seen >= 3, "expected several refreshes, saw {seen}");
    assert_eq!(last.unwrap().logs.len(), 3);
    assert!(backend.hits.load(Ordering::SeqCst) >= seen);
}

#[tokio::test]
async fn poller_survives_failed_refreshes() {
    let backend = Shared::default();
    backend.fail_logs.store(true, Ordering::SeqCst);
    let base = serve(backend.clone()).await;
    let client = FeedClient::new(FeedConfig::new(base, KEY)).unwrap();
    let poller = Poller::new(client).with_interval(Duration::from_millis(30));

    let mut seen = 0usize;
    let last = poller
        .run(|_| seen += 1, tokio::time::sleep(Duration::from_millis(120)))
        .await;

    assert_eq!(seen, 0);
    assert!(last.is_none());
    assert!(backend.hits.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn poller_keeps_last_good_snapshot_after_failures() {
    let backend = Shared::default();
    let base = serve(backend.clone()).await;
    let client = FeedClient::new(FeedConfig::new(base, KEY)).unwrap();
    let poller = Poller::new(client).with_interval(Duration::from_millis(30));

    let mut seen = 0usize;
    let last = poller
        .run(
            |_| {
                seen += 1;
                backend.fail_logs.store(true, Ordering::SeqCst);
            },
            tokio::time::sleep(Duration::from_millis(150)),
        )
        .await;

    assert_eq!(seen, 1);
    assert!(backend.hits.load(Ordering::SeqCst) >= 3);
    let last = last.expect("first refresh is kept");
    assert_eq!(last.logs.len(), 3);
    assert!(last.stats.is_some());
}
