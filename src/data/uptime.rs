//! Uptime ratio and severity tier for a single endpoint.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use pingwatch_types::{CheckRecord, EndpointId};

use crate::error::CoreError;

/// Default trailing window, matching the backend's 24h uptime figure.
pub const DEFAULT_WINDOW_HOURS: i64 = 24;

/// Coarse health classification derived from an uptime percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UptimeTier {
    Healthy,
    Degraded,
    Critical,
}

impl UptimeTier {
    /// Classify a percentage: above 95 is healthy, above 90 degraded, the rest critical.
    pub fn classify(percentage: f64) -> Self {
        if percentage > 95.0 {
            UptimeTier::Healthy
        } else if percentage > 90.0 {
            UptimeTier::Degraded
        } else {
            UptimeTier::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UptimeTier::Healthy => "healthy",
            UptimeTier::Degraded => "degraded",
            UptimeTier::Critical => "critical",
        }
    }
}

/// The trailing period an uptime figure covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingWindow {
    hours: i64,
    end: Option<DateTime<Utc>>,
}

impl TrailingWindow {
    /// A window of `hours` whose records the caller has already bounded.
    pub fn new(hours: i64) -> Result<Self, CoreError> {
        if hours < 0 {
            return Err(CoreError::NegativeWindow(hours));
        }
        Ok(Self { hours, end: None })
    }

    /// Only count records in `[now - hours, now]`.
    pub fn ending_at(mut self, now: DateTime<Utc>) -> Self {
        self.end = Some(now);
        self
    }

    pub fn hours(&self) -> i64 {
        self.hours
    }

    fn contains(&self, at: DateTime<Utc>) -> bool {
        match self.end {
            None => true,
            Some(end) => at <= end && at >= end - Duration::hours(self.hours),
        }
    }
}

impl Default for TrailingWindow {
    fn default() -> Self {
        Self {
            hours: DEFAULT_WINDOW_HOURS,
            end: None,
        }
    }
}

/// Derived success ratio for one endpoint over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UptimeWindow {
    pub endpoint: EndpointId,
    pub total_checks: u64,
    pub successful_checks: u64,
    /// Rounded to one decimal. `None` means no checks fell in the window.
    pub percentage: Option<f64>,
    pub window_hours: i64,
}

impl UptimeWindow {
    /// Summarise the checks of `endpoint` that fall inside `window`.
    ///
    /// Records for other endpoints are ignored, so callers may pass an
    /// unpartitioned log.
    pub fn summarize<'a, I>(endpoint: EndpointId, checks: I, window: &TrailingWindow) -> Self
    where
        I: IntoIterator<Item = &'a CheckRecord>,
    {
        let (total_checks, successful_checks) = checks
            .into_iter()
            .filter(|c| c.endpoint_id() == endpoint && window.contains(c.created_at))
            .fold((0u64, 0u64), |(total, ok), c| {
                (total + 1, ok + u64::from(c.is_success()))
            });

        let percentage = (total_checks > 0).then(|| {
            let ratio = successful_checks as f64 / total_checks as f64;
            (ratio * 1000.0).round() / 10.0
        });

        Self {
            endpoint,
            total_checks,
            successful_checks,
            percentage,
            window_hours: window.hours(),
        }
    }

    /// Tier for colouring, absent when there is no data.
    pub fn tier(&self) -> Option<UptimeTier> {
        self.percentage.map(UptimeTier::classify)
    }

    /// Whether any check fell in the window.
    pub fn has_data(&self) -> bool {
        self.percentage.is_some()
    }

    /// Percentage for display, `"no data"` when undefined.
    pub fn display_percentage(&self) -> String {
        match self.percentage {
            Some(p) => format!("{:.1}%", p),
            None => "no data".to_string(),
        }
    }
}
