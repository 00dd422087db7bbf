// src/feed/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named documents the dashboard refreshes each cycle. Names map to
/// `<name>.json` in whatever backing store a [`DataSource`] wraps.
pub const NEWS_FEED: &str = "news_feed";
pub const CURRENT_STATUS: &str = "current_status";
pub const CONFLICT_TIMELINE: &str = "conflict_timeline";
pub const CONFLICT_LOCATIONS: &str = "conflict_locations";

/// Ranked severity shared by news items and timeline events.
///
/// Values outside the four known levels deserialize as `Unknown`, which ranks
/// after every known level so records carrying a new upstream label land at
/// the bottom of the feed rather than the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Priority {
    /// Sort rank; lower means more severe.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::Unknown => 4,
        }
    }
}

/// One entry of `news_feed.json`. Field names stay camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub category: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}

/// One entry of `conflict_timeline.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub severity: Priority,
    pub location: String,
    #[serde(default)]
    pub casualties: u32,
    pub source: String,
}

/// Errors a document fetch can produce. All of them are absorbed at the
/// refresh boundary; the store keeps its previous snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("document `{0}` not found")]
    NotFound(String),
    #[error("reading document: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing document `{name}`: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[cfg(feature = "feed-http")]
    #[error("http fetch failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Fetch-by-name abstraction over wherever the dashboard documents live.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the raw JSON body of a named document (no `.json` suffix).
    async fn fetch_document(&self, name: &str) -> Result<String, FetchError>;
    fn name(&self) -> &'static str;
}
