// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/news (derived view + facets, query filters)
// - GET /api/timeline (type filter + summary)
// - GET /api/status
// - POST /api/auto-refresh
// - POST /api/refresh

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as Json};
use tower::ServiceExt as _; // for `oneshot`

use conflict_dashboard::api::{self, AppState};
use conflict_dashboard::feed::providers::fixture::FixtureSource;
use conflict_dashboard::feed::scheduler::RefreshScheduler;
use conflict_dashboard::feed::types::DataSource;
use conflict_dashboard::store::DashboardStore;
use conflict_dashboard::feed;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

fn fixtures_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

/// Build the same Router the binary uses, preloaded from the test fixtures.
async fn test_router() -> (Router, RefreshScheduler) {
    let store = Arc::new(DashboardStore::new());
    let source: Arc<dyn DataSource> = Arc::new(FixtureSource::new(fixtures_dir()));
    feed::refresh_once(source.as_ref(), &store).await;

    let scheduler = RefreshScheduler::new();
    let state = AppState {
        store,
        source,
        scheduler: scheduler.handle(),
        data_dir: fixtures_dir(),
    };
    (api::router(state), scheduler)
}

async fn get_json(app: Router, uri: &str) -> Json {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET request");
    let resp = app.oneshot(req).await.expect("oneshot");
    assert!(resp.status().is_success(), "GET {uri} -> {}", resp.status());
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn health_returns_200_and_ok_body() {
    let (app, _sched) = test_router().await;
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), "ok");
}

#[tokio::test]
async fn news_view_is_sorted_and_carries_facets() {
    let (app, _sched) = test_router().await;
    let v = get_json(app, "/api/news").await;

    assert_eq!(v["total"], json!(3));
    let items = v["items"].as_array().expect("items array");
    // critical first, unknown label last regardless of recency
    assert_eq!(items[0]["id"], json!("n-1"));
    assert_eq!(items[1]["id"], json!("n-2"));
    assert_eq!(items[2]["id"], json!("n-3"));
    assert!(items[0].get("publishedAt").is_some(), "camelCase wire shape");
    assert!(items[0].get("timeAgo").is_some(), "relative age is included");

    let categories: Vec<&str> = v["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["military", "breaking", "diplomatic"]);
}

#[tokio::test]
async fn news_view_applies_query_filters() {
    let (app, _sched) = test_router().await;
    let v = get_json(app.clone(), "/api/news?search=iran").await;
    assert_eq!(v["total"], json!(1));
    assert_eq!(v["items"][0]["id"], json!("n-1"));

    let v = get_json(app.clone(), "/api/news?category=breaking").await;
    assert_eq!(v["total"], json!(1));
    assert_eq!(v["items"][0]["id"], json!("n-2"));

    let v = get_json(app, "/api/news?source=AP&category=diplomatic").await;
    assert_eq!(v["total"], json!(0));
}

#[tokio::test]
async fn timeline_view_filters_by_type_and_summarizes() {
    let (app, _sched) = test_router().await;
    let v = get_json(app.clone(), "/api/timeline").await;
    assert_eq!(v["total"], json!(3));
    assert_eq!(v["summary"]["criticalEvents"], json!(1));
    assert_eq!(v["summary"]["militaryActions"], json!(2));
    assert_eq!(v["summary"]["totalCasualties"], json!(13));
    assert!(v["summary"]["daysSinceFirstStrike"].as_i64().unwrap() > 0);

    let v = get_json(app, "/api/timeline?type=diplomatic").await;
    assert_eq!(v["total"], json!(1));
    assert_eq!(v["events"][0]["id"], json!("t-3"));
}

#[tokio::test]
async fn status_view_reports_snapshot_and_refresh_state() {
    let (app, _sched) = test_router().await;
    let v = get_json(app, "/api/status").await;
    assert_eq!(v["status"]["conflictStatus"]["level"], json!("critical"));
    assert_eq!(v["autoRefresh"], json!(true));
    assert!(v["lastUpdated"].is_string());
}

#[tokio::test]
async fn auto_refresh_toggle_round_trips() {
    let (app, _sched) = test_router().await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/auto-refresh")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "enabled": false }).to_string()))
        .expect("build POST /api/auto-refresh");
    let resp = app.clone().oneshot(req).await.expect("oneshot");
    assert!(resp.status().is_success());
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    let v: Json = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["enabled"], json!(false));

    let v = get_json(app, "/api/status").await;
    assert_eq!(v["autoRefresh"], json!(false));
}

#[tokio::test]
async fn manual_refresh_reports_updated_documents() {
    let (app, _sched) = test_router().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/refresh")
        .body(Body::empty())
        .expect("build POST /api/refresh");
    let resp = app.oneshot(req).await.expect("oneshot /api/refresh");
    assert!(resp.status().is_success());
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    let v: Json = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["updated"].as_array().unwrap().len(), 4);
    assert!(v["failed"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn locations_passthrough_serves_the_document() {
    let (app, _sched) = test_router().await;
    let v = get_json(app, "/api/locations").await;
    assert_eq!(v["iran"]["capital"]["name"], json!("Tehran"));
}
