// src/store.rs
//! In-memory snapshot store for the fetched documents. Each document is
//! swapped atomically on a successful fetch; a failed fetch leaves the
//! previous snapshot visible (stale but valid) until the next success.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::feed::types::{NewsItem, TimelineEvent};
use crate::status::StatusSnapshot;

#[derive(Debug, Default)]
pub struct DashboardStore {
    news: RwLock<Vec<NewsItem>>,
    timeline: RwLock<Vec<TimelineEvent>>,
    status: RwLock<Option<StatusSnapshot>>,
    locations: RwLock<Option<Value>>,
    last_updated: RwLock<Option<DateTime<Utc>>>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_news(&self, items: Vec<NewsItem>) {
        *self.news.write().expect("store rwlock poisoned") = items;
    }

    pub fn news(&self) -> Vec<NewsItem> {
        self.news.read().expect("store rwlock poisoned").clone()
    }

    pub fn replace_timeline(&self, events: Vec<TimelineEvent>) {
        *self.timeline.write().expect("store rwlock poisoned") = events;
    }

    pub fn timeline(&self) -> Vec<TimelineEvent> {
        self.timeline.read().expect("store rwlock poisoned").clone()
    }

    pub fn replace_status(&self, snapshot: StatusSnapshot) {
        *self.status.write().expect("store rwlock poisoned") = Some(snapshot);
    }

    pub fn status(&self) -> Option<StatusSnapshot> {
        self.status.read().expect("store rwlock poisoned").clone()
    }

    pub fn replace_locations(&self, doc: Value) {
        *self.locations.write().expect("store rwlock poisoned") = Some(doc);
    }

    pub fn locations(&self) -> Option<Value> {
        self.locations.read().expect("store rwlock poisoned").clone()
    }

    pub fn mark_updated(&self, ts: DateTime<Utc>) {
        *self.last_updated.write().expect("store rwlock poisoned") = Some(ts);
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        *self.last_updated.read().expect("store rwlock poisoned")
    }
}
