use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::feed::scheduler::SchedulerHandle;
use crate::feed::types::{DataSource, NewsItem, TimelineEvent};
use crate::feed::{self, RefreshReport};
use crate::status::{self, StatusSnapshot, TimelineSummary};
use crate::store::DashboardStore;
use crate::view::{self, FilterState};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DashboardStore>,
    pub source: Arc<dyn DataSource>,
    pub scheduler: SchedulerHandle,
    /// Directory also mounted at `/data` for the UI's static fetches.
    pub data_dir: PathBuf,
}

pub fn router(state: AppState) -> Router {
    let data_dir = state.data_dir.clone();
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/news", get(news_view))
        .route("/api/timeline", get(timeline_view))
        .route("/api/status", get(status_view))
        .route("/api/locations", get(locations_view))
        .route("/api/refresh", post(refresh_now))
        .route("/api/auto-refresh", post(set_auto_refresh))
        .nest_service("/data", ServeDir::new(data_dir))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NewsQuery {
    search: Option<String>,
    category: Option<String>,
    source: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewsEntry {
    #[serde(flatten)]
    item: NewsItem,
    time_ago: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewsView {
    items: Vec<NewsEntry>,
    total: usize,
    categories: Vec<String>,
    sources: Vec<String>,
}

async fn news_view(State(state): State<AppState>, Query(q): Query<NewsQuery>) -> Json<NewsView> {
    let raw = state.store.news();
    let filter = FilterState {
        search: q.search.unwrap_or_default(),
        category: q.category.unwrap_or_else(|| view::ALL.to_string()),
        source: q.source.unwrap_or_else(|| view::ALL.to_string()),
    };
    let now = Utc::now();
    let items: Vec<NewsEntry> = view::apply(&raw, &filter)
        .into_iter()
        .map(|item| NewsEntry {
            time_ago: status::format_time_ago(item.published_at, now),
            item,
        })
        .collect();
    let (categories, sources) = view::facets(&raw);
    Json(NewsView {
        total: items.len(),
        items,
        categories,
        sources,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TimelineQuery {
    #[serde(rename = "type")]
    event_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineView {
    events: Vec<TimelineEvent>,
    total: usize,
    types: Vec<String>,
    summary: TimelineSummary,
}

async fn timeline_view(
    State(state): State<AppState>,
    Query(q): Query<TimelineQuery>,
) -> Json<TimelineView> {
    let raw = state.store.timeline();
    let filter = FilterState {
        category: q.event_type.unwrap_or_else(|| view::ALL.to_string()),
        ..FilterState::default()
    };
    let events = view::apply(&raw, &filter);
    let (types, _) = view::facets(&raw);
    let summary = status::timeline_summary(&raw, Utc::now());
    Json(TimelineView {
        total: events.len(),
        events,
        types,
        summary,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView {
    status: Option<StatusSnapshot>,
    last_updated: Option<DateTime<Utc>>,
    auto_refresh: bool,
}

async fn status_view(State(state): State<AppState>) -> Json<StatusView> {
    Json(StatusView {
        status: state.store.status(),
        last_updated: state.store.last_updated(),
        auto_refresh: state.scheduler.is_enabled(),
    })
}

async fn locations_view(State(state): State<AppState>) -> Json<Option<serde_json::Value>> {
    Json(state.store.locations())
}

async fn refresh_now(State(state): State<AppState>) -> Json<RefreshReport> {
    let report = feed::refresh_once(state.source.as_ref(), &state.store).await;
    Json(report)
}

#[derive(Debug, Deserialize)]
struct AutoRefreshReq {
    enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoRefreshResp {
    enabled: bool,
}

async fn set_auto_refresh(
    State(state): State<AppState>,
    Json(body): Json<AutoRefreshReq>,
) -> Json<AutoRefreshResp> {
    state.scheduler.set_enabled(body.enabled);
    Json(AutoRefreshResp {
        enabled: state.scheduler.is_enabled(),
    })
}
