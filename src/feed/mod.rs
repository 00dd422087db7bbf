// src/feed/mod.rs
pub mod providers;
pub mod scheduler;
pub mod types;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::feed::types::{DataSource, FetchError, NewsItem, TimelineEvent};
use crate::status::StatusSnapshot;
use crate::store::DashboardStore;

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("refresh_runs_total", "Completed refresh cycles.");
        describe_counter!(
            "refresh_documents_total",
            "Documents fetched and parsed successfully."
        );
        describe_counter!(
            "refresh_document_errors_total",
            "Document fetch/parse failures (previous snapshot retained)."
        );
        describe_counter!("refresh_ticks_total", "Scheduler ticks that ran the callback.");
        describe_counter!(
            "refresh_ticks_skipped_total",
            "Scheduler ticks skipped while auto-refresh was disabled."
        );
        describe_counter!("refresh_tick_errors_total", "Refresh callbacks that failed.");
        describe_gauge!(
            "refresh_last_run_ts",
            "Unix ts when a refresh last updated any document."
        );
    });
}

/// Normalize fixture text: decode HTML entities, strip tags, collapse
/// whitespace, cap length. Summaries in the source documents occasionally
/// carry markup fragments from upstream feeds.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").expect("tags regex"));
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").expect("ws regex"));
    out = re_ws.replace_all(&out, " ").to_string();
    out = out.trim().to_string();

    // Length cap: 2000 chars, summaries are preview text
    if out.chars().count() > 2000 {
        out = out.chars().take(2000).collect();
    }

    out
}

/// Outcome of one refresh cycle, by document name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefreshReport {
    pub updated: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

impl RefreshReport {
    fn record_failure(&mut self, name: &'static str, err: &FetchError) {
        counter!("refresh_document_errors_total").increment(1);
        tracing::warn!(target: "feed", document = name, error = %err, "document refresh failed");
        self.failed.push(name);
    }
}

/// Run one refresh cycle: fetch every named document, parse it, and swap it
/// into the store. A failed document keeps its previous snapshot; the cycle
/// itself never fails, so one bad fetch can never take the dashboard down.
pub async fn refresh_once(source: &dyn DataSource, store: &DashboardStore) -> RefreshReport {
    ensure_metrics_described();
    let mut report = RefreshReport::default();

    match load_news(source).await {
        Ok(items) => {
            store.replace_news(items);
            report.updated.push(types::NEWS_FEED);
        }
        Err(e) => report.record_failure(types::NEWS_FEED, &e),
    }

    match load_timeline(source).await {
        Ok(events) => {
            store.replace_timeline(events);
            report.updated.push(types::CONFLICT_TIMELINE);
        }
        Err(e) => report.record_failure(types::CONFLICT_TIMELINE, &e),
    }

    match load_status(source).await {
        Ok(snapshot) => {
            store.replace_status(snapshot);
            report.updated.push(types::CURRENT_STATUS);
        }
        Err(e) => report.record_failure(types::CURRENT_STATUS, &e),
    }

    match load_locations(source).await {
        Ok(doc) => {
            store.replace_locations(doc);
            report.updated.push(types::CONFLICT_LOCATIONS);
        }
        Err(e) => report.record_failure(types::CONFLICT_LOCATIONS, &e),
    }

    if !report.updated.is_empty() {
        let now = chrono::Utc::now();
        store.mark_updated(now);
        gauge!("refresh_last_run_ts").set(now.timestamp().max(0) as f64);
    }

    counter!("refresh_runs_total").increment(1);
    tracing::info!(
        target: "feed",
        source = source.name(),
        updated = report.updated.len(),
        failed = report.failed.len(),
        "refresh cycle"
    );
    report
}

pub async fn load_news(source: &dyn DataSource) -> Result<Vec<NewsItem>, FetchError> {
    let body = source.fetch_document(types::NEWS_FEED).await?;
    let mut items: Vec<NewsItem> = parse_document(types::NEWS_FEED, &body)?;
    for item in &mut items {
        item.title = normalize_text(&item.title);
        item.summary = normalize_text(&item.summary);
    }
    counter!("refresh_documents_total").increment(1);
    Ok(items)
}

pub async fn load_timeline(source: &dyn DataSource) -> Result<Vec<TimelineEvent>, FetchError> {
    let body = source.fetch_document(types::CONFLICT_TIMELINE).await?;
    let mut events: Vec<TimelineEvent> = parse_document(types::CONFLICT_TIMELINE, &body)?;
    for ev in &mut events {
        ev.description = normalize_text(&ev.description);
    }
    counter!("refresh_documents_total").increment(1);
    Ok(events)
}

pub async fn load_status(source: &dyn DataSource) -> Result<StatusSnapshot, FetchError> {
    let body = source.fetch_document(types::CURRENT_STATUS).await?;
    let snapshot = parse_document(types::CURRENT_STATUS, &body)?;
    counter!("refresh_documents_total").increment(1);
    Ok(snapshot)
}

pub async fn load_locations(source: &dyn DataSource) -> Result<serde_json::Value, FetchError> {
    let body = source.fetch_document(types::CONFLICT_LOCATIONS).await?;
    let doc = parse_document(types::CONFLICT_LOCATIONS, &body)?;
    counter!("refresh_documents_total").increment(1);
    Ok(doc)
}

fn parse_document<T: serde::de::DeserializeOwned>(
    name: &'static str,
    body: &str,
) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse {
        name: name.to_string(),
        source: e,
    })
}
