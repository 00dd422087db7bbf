// src/view.rs
//! Derived view computation: filtering and multi-key ordering over feed
//! records. `apply` is a pure function of `(records, filter)`; callers
//! recompute it whenever either input changes and never mutate the result.

use serde::{Deserialize, Serialize};

use crate::feed::types::{NewsItem, Priority, TimelineEvent};

/// Sentinel filter value matching any category/source.
pub const ALL: &str = "all";

/// Fields the text filter may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Summary,
    Source,
}

/// Default searchable fields, matching the feed search box.
pub const DEFAULT_SEARCH_FIELDS: &[SearchField] =
    &[SearchField::Title, SearchField::Summary, SearchField::Source];

/// Active filters over a record collection. The empty search term and the
/// `"all"` sentinel match every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search: String,
    pub category: String,
    pub source: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_string(),
            source: ALL.to_string(),
        }
    }
}

impl FilterState {
    pub fn category_active(&self) -> bool {
        self.category != ALL
    }

    pub fn source_active(&self) -> bool {
        self.source != ALL
    }
}

/// Record types the view engine can filter and order.
pub trait Viewable {
    fn priority(&self) -> Priority;
    /// Unix timestamp used for the recency key.
    fn timestamp(&self) -> i64;
    fn category(&self) -> &str;
    fn source(&self) -> &str;
    fn field_text(&self, field: SearchField) -> Option<&str>;
}

impl Viewable for NewsItem {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn timestamp(&self) -> i64 {
        self.published_at.timestamp()
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn field_text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Title => Some(&self.title),
            SearchField::Summary => Some(&self.summary),
            SearchField::Source => Some(&self.source),
        }
    }
}

impl Viewable for TimelineEvent {
    fn priority(&self) -> Priority {
        self.severity
    }

    fn timestamp(&self) -> i64 {
        self.date.timestamp()
    }

    fn category(&self) -> &str {
        &self.event_type
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn field_text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Title => Some(&self.title),
            SearchField::Summary => Some(&self.description),
            SearchField::Source => Some(&self.source),
        }
    }
}

/// Compute the derived view with the default searchable fields.
pub fn apply<R: Viewable + Clone>(records: &[R], filter: &FilterState) -> Vec<R> {
    apply_with_fields(records, filter, DEFAULT_SEARCH_FIELDS)
}

/// Every record passing all active filters, ordered by priority rank
/// (most severe first, unknown last), then newest first. The sort is
/// stable: ties keep their input order.
pub fn apply_with_fields<R: Viewable + Clone>(
    records: &[R],
    filter: &FilterState,
    fields: &[SearchField],
) -> Vec<R> {
    let term = filter.search.trim().to_lowercase();
    let mut out: Vec<R> = records
        .iter()
        .filter(|r| {
            let search_ok = term.is_empty()
                || fields.iter().any(|f| {
                    r.field_text(*f)
                        .is_some_and(|t| t.to_lowercase().contains(&term))
                });
            let category_ok = !filter.category_active() || r.category() == filter.category;
            let source_ok = !filter.source_active() || r.source() == filter.source;
            search_ok && category_ok && source_ok
        })
        .cloned()
        .collect();

    out.sort_by(|a, b| {
        a.priority()
            .rank()
            .cmp(&b.priority().rank())
            .then_with(|| b.timestamp().cmp(&a.timestamp()))
    });
    out
}

/// Distinct categories and sources present in the raw collection, in
/// first-seen order; the UI builds its dropdowns from these.
pub fn facets<R: Viewable>(records: &[R]) -> (Vec<String>, Vec<String>) {
    let mut categories: Vec<String> = Vec::new();
    let mut sources: Vec<String> = Vec::new();
    for r in records {
        if !categories.iter().any(|c| c.as_str() == r.category()) {
            categories.push(r.category().to_string());
        }
        if !sources.iter().any(|s| s.as_str() == r.source()) {
            sources.push(r.source().to_string());
        }
    }
    (categories, sources)
}
