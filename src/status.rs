// src/status.rs
//! Shapes of `current_status.json` and the summary arithmetic behind the
//! dashboard panels (timeline totals, day counters, relative timestamps).

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::feed::types::{Priority, TimelineEvent};

/// First day of direct strikes; the "days since" counter measures from here.
const CONFLICT_START_YMD: (i32, u32, u32) = (2024, 10, 26);

/// `current_status.json` as the UI consumes it, camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub conflict_status: ConflictStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_indicators: Option<EscalationIndicators>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recent_developments: Vec<RecentDevelopment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ConflictMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictStatus {
    pub level: Priority,
    pub description: String,
    #[serde(default)]
    pub days_active: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationIndicators {
    pub diplomatic_tension: String,
    pub military_readiness: String,
    pub civilian_evacuations: String,
    pub international_concern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentDevelopment {
    pub time: DateTime<Utc>,
    pub event: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictMetrics {
    #[serde(default)]
    pub total_casualties: u32,
    #[serde(default)]
    pub israeli_casualties: u32,
    #[serde(default)]
    pub iranian_casualties: u32,
    #[serde(default)]
    pub strikes_by: StrikesBy,
    #[serde(default)]
    pub missile_interceptions: u32,
    // Free-form lists the panels render verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations_targeted: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure_damage: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrikesBy {
    #[serde(default)]
    pub israel: u32,
    #[serde(default)]
    pub iran: u32,
}

/// Aggregates shown in the timeline footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSummary {
    pub critical_events: usize,
    pub military_actions: usize,
    pub total_casualties: u64,
    pub days_since_first_strike: i64,
}

pub fn timeline_summary(events: &[TimelineEvent], now: DateTime<Utc>) -> TimelineSummary {
    TimelineSummary {
        critical_events: events
            .iter()
            .filter(|e| e.severity == Priority::Critical)
            .count(),
        military_actions: events
            .iter()
            .filter(|e| e.event_type == "military_action")
            .count(),
        total_casualties: events.iter().map(|e| u64::from(e.casualties)).sum(),
        days_since_first_strike: (now - conflict_start()).num_days().max(0),
    }
}

fn conflict_start() -> DateTime<Utc> {
    let (y, m, d) = CONFLICT_START_YMD;
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("conflict start date")
}

/// `12m ago` / `3h ago` / `2d ago`, the feed header formatting.
pub fn format_time_ago(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - ts).num_minutes().max(0);
    if mins < 60 {
        format!("{mins}m ago")
    } else if mins < 1440 {
        format!("{}h ago", mins / 60)
    } else {
        format!("{}d ago", mins / 1440)
    }
}
