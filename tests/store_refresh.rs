// tests/store_refresh.rs
//
// The refresh cycle against the on-disk fixtures: successful documents are
// swapped into the store, failures keep the previous snapshot visible and
// are reported, never raised.

use chrono::{TimeZone, Utc};
use conflict_dashboard::feed::providers::fixture::FixtureSource;
use conflict_dashboard::feed::types::{NewsItem, Priority};
use conflict_dashboard::feed;
use conflict_dashboard::store::DashboardStore;

fn fixtures() -> FixtureSource {
    FixtureSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

fn bad_fixtures() -> FixtureSource {
    FixtureSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures_bad"))
}

fn seed_item() -> NewsItem {
    NewsItem {
        id: "seed".to_string(),
        title: "Seed item".to_string(),
        summary: "Previously fetched.".to_string(),
        source: "AP".to_string(),
        published_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        category: "military".to_string(),
        url: "https://example.org/seed".to_string(),
        image: None,
        priority: Priority::Low,
    }
}

#[tokio::test]
async fn refresh_populates_every_document() {
    let store = DashboardStore::new();
    let report = feed::refresh_once(&fixtures(), &store).await;

    assert_eq!(report.updated.len(), 4, "failed: {:?}", report.failed);
    assert!(report.failed.is_empty());

    assert_eq!(store.news().len(), 3);
    assert_eq!(store.timeline().len(), 3);
    let status = store.status().expect("status snapshot");
    assert_eq!(status.conflict_status.days_active, 12);
    assert!(store.locations().is_some());
    assert!(store.last_updated().is_some());
}

#[tokio::test]
async fn unknown_priority_label_survives_the_pipeline_as_unknown() {
    let store = DashboardStore::new();
    feed::refresh_once(&fixtures(), &store).await;

    let news = store.news();
    let odd = news.iter().find(|n| n.id == "n-3").expect("n-3 present");
    assert_eq!(odd.priority, Priority::Unknown);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_snapshot() {
    let store = DashboardStore::new();
    store.replace_news(vec![seed_item()]);

    let report = feed::refresh_once(&bad_fixtures(), &store).await;

    assert!(report.updated.is_empty());
    assert_eq!(report.failed.len(), 4);
    let news = store.news();
    assert_eq!(news.len(), 1, "stale snapshot must stay visible");
    assert_eq!(news[0].id, "seed");
    assert!(store.last_updated().is_none(), "nothing updated, no timestamp");
}

#[tokio::test]
async fn partial_failure_updates_what_it_can() {
    let tmp = tempfile::tempdir().unwrap();
    // Only the news document exists; the other three are missing.
    let news = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/news_feed.json"
    ))
    .unwrap();
    std::fs::write(tmp.path().join("news_feed.json"), news).unwrap();

    let store = DashboardStore::new();
    let report = feed::refresh_once(&FixtureSource::new(tmp.path()), &store).await;

    assert_eq!(report.updated, vec!["news_feed"]);
    assert_eq!(report.failed.len(), 3);
    assert_eq!(store.news().len(), 3);
    assert!(store.status().is_none());
    assert!(store.last_updated().is_some(), "any success marks an update");
}
