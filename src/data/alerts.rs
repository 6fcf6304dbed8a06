//! Recent alert rollup with relative and absolute timestamps.

use std::collections::HashSet;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;

use pingwatch_types::{AlertEvent, EndpointId, RecordId};

/// Fixed offset all absolute timestamps are rendered in.
///
/// The dashboard shows one product-wide zone rather than the viewer's local
/// one, so every operator reads the same clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayZone {
    offset: FixedOffset,
    label: String,
}

impl DisplayZone {
    pub fn new(offset: FixedOffset, label: impl Into<String>) -> Self {
        Self {
            offset,
            label: label.into(),
        }
    }

    /// Build from an offset string such as `"+05:30"`.
    pub fn parse(offset: &str, label: impl Into<String>) -> Result<Self> {
        let offset = FixedOffset::from_str(offset.trim())
            .map_err(|e| anyhow!("Invalid zone offset `{}`: {}", offset, e))?;
        Ok(Self::new(offset, label))
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix(), "UTC")
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Render as `"{day} {month}, {hour}:{minute} {AM/PM} {label}"`.
    pub fn format(&self, at: DateTime<Utc>) -> String {
        format!(
            "{} {}",
            at.with_timezone(&self.offset).format("%-d %b, %I:%M %p"),
            self.label
        )
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self::utc()
    }
}

/// Relative label for how long ago `at` was, floored to the unit.
///
/// Instants in the future read "Just now".
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{} min{} ago", minutes, plural(minutes));
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} hour{} ago", hours, plural(hours));
    }

    let days = hours / 24;
    format!("{} day{} ago", days, plural(days))
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// An alert with its display strings attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedAlert {
    pub id: RecordId,
    pub endpoint: EndpointId,
    pub endpoint_name: String,
    pub endpoint_url: String,
    pub created_at: DateTime<Utc>,
    /// Absolute time in the display zone.
    pub display_time: String,
    pub time_ago: String,
}

/// Newest-first, de-duplicated alerts plus the incident count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertDigest {
    pub alerts: Vec<AnnotatedAlert>,
    pub incident_count: usize,
}

impl AlertDigest {
    /// Roll up `events` as of `now`.
    ///
    /// Repeated alert ids keep their first occurrence. Ties on the creation
    /// time keep input order. Nothing is truncated.
    pub fn aggregate(events: &[AlertEvent], now: DateTime<Utc>, zone: &DisplayZone) -> Self {
        let mut seen = HashSet::new();
        let mut unique: Vec<&AlertEvent> = events.iter().filter(|e| seen.insert(e.id)).collect();
        unique.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let alerts: Vec<AnnotatedAlert> = unique
            .into_iter()
            .map(|e| AnnotatedAlert {
                id: e.id,
                endpoint: e.target.id,
                endpoint_name: e.target.name.clone(),
                endpoint_url: e.target.url.clone(),
                created_at: e.created_at,
                display_time: zone.format(e.created_at),
                time_ago: time_ago(e.created_at, now),
            })
            .collect();

        Self {
            incident_count: alerts.len(),
            alerts,
        }
    }

    /// Incident badge text.
    pub fn incident_label(&self) -> String {
        format!(
            "{} Incident{}",
            self.incident_count,
            if self.incident_count == 1 { "" } else { "s" }
        )
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
