//! Snapshot processing into display-ready dashboard data.
//!
//! This module runs the uptime, stats and alert computations over a validated
//! snapshot so the views only have to format.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use pingwatch_types::{Endpoint, EndpointId, RawSnapshot, Snapshot, TargetRef};

use crate::source::validate;

use super::alerts::{AlertDigest, DisplayZone};
use super::badge::LatencyThresholds;
use super::logs::DEFAULT_PAGE_SIZE;
use super::stats::DashboardStats;
use super::uptime::{TrailingWindow, UptimeTier, UptimeWindow, DEFAULT_WINDOW_HOURS};

/// Presentation parameters shared by every view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    /// Trailing uptime window in hours.
    pub window_hours: i64,
    pub zone: DisplayZone,
    pub latency: LatencyThresholds,
    pub page_size: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            zone: DisplayZone::default(),
            latency: LatencyThresholds::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// An endpoint with its uptime over the configured window.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRow {
    pub endpoint: Endpoint,
    pub uptime: UptimeWindow,
}

impl EndpointRow {
    pub fn tier(&self) -> Option<UptimeTier> {
        self.uptime.tier()
    }
}

/// Complete processed data ready for display.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub snapshot: Snapshot,
    /// Down endpoints first, then by worsening tier, then by name.
    pub endpoints: Vec<EndpointRow>,
    pub stats: DashboardStats,
    /// Aggregates as reported by the backend, if the snapshot carried them.
    pub backend_stats: Option<DashboardStats>,
    pub alerts: AlertDigest,
    /// Every endpoint that appears in the endpoint list or the logs.
    pub targets: BTreeMap<EndpointId, TargetRef>,
    /// Number of records dropped during validation.
    pub rejected: usize,
    pub computed_at: DateTime<Utc>,
    pub last_updated: Instant,
}

impl DashboardData {
    /// Load and process a snapshot file.
    pub fn load(path: &Path, settings: &ViewSettings, now: DateTime<Utc>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, settings, now)
    }

    /// Parse and process a snapshot JSON document.
    pub fn parse(content: &str, settings: &ViewSettings, now: DateTime<Utc>) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(content)?;
        Self::from_raw(raw, settings, now)
    }

    /// Validate a raw snapshot, logging every rejected record.
    pub fn from_raw(raw: RawSnapshot, settings: &ViewSettings, now: DateTime<Utc>) -> Result<Self> {
        let (snapshot, rejected) = validate(raw);
        let mut data = Self::from_snapshot(snapshot, settings, now)?;
        data.rejected = rejected;
        Ok(data)
    }

    /// Run every derived computation over a validated snapshot.
    pub fn from_snapshot(
        snapshot: Snapshot,
        settings: &ViewSettings,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let window = TrailingWindow::new(settings.window_hours)?.ending_at(now);

        let mut endpoints: Vec<EndpointRow> = snapshot
            .endpoints
            .iter()
            .map(|endpoint| EndpointRow {
                uptime: UptimeWindow::summarize(endpoint.id, &snapshot.logs, &window),
                endpoint: endpoint.clone(),
            })
            .collect();

        endpoints.sort_by(|a, b| {
            b.endpoint
                .is_down
                .cmp(&a.endpoint.is_down)
                .then_with(|| tier_rank(b.tier()).cmp(&tier_rank(a.tier())))
                .then_with(|| a.endpoint.name.cmp(&b.endpoint.name))
        });

        let stats = DashboardStats::reduce(endpoints.iter().map(|r| (&r.endpoint, &r.uptime)));
        let backend_stats = snapshot.stats.as_ref().map(DashboardStats::from);
        if let Some(ref backend) = snapshot.stats {
            if stats.disagrees_with(backend) {
                debug!(
                    "Backend stats report {}/{} up, local snapshot has {}/{}",
                    backend.up_count, backend.total_endpoints, stats.up, stats.total
                );
            }
        }

        let alerts = AlertDigest::aggregate(&snapshot.alerts, now, &settings.zone);

        let mut targets: BTreeMap<EndpointId, TargetRef> =
            snapshot.endpoints.iter().map(|e| (e.id, e.target_ref())).collect();
        for log in &snapshot.logs {
            targets.entry(log.endpoint_id()).or_insert_with(|| log.target.clone());
        }

        Ok(Self {
            snapshot,
            endpoints,
            stats,
            backend_stats,
            alerts,
            targets,
            rejected: 0,
            computed_at: now,
            last_updated: Instant::now(),
        })
    }

    /// Identifiers of every known endpoint, the "select all" set.
    pub fn known_endpoints(&self) -> BTreeSet<EndpointId> {
        self.targets.keys().copied().collect()
    }

    /// Whether the backend's aggregate counts differ from the local ones.
    pub fn stats_mismatch(&self) -> bool {
        self.snapshot
            .stats
            .as_ref()
            .is_some_and(|backend| self.stats.disagrees_with(backend))
    }

    /// Pretty JSON of the derived views: stats, per-endpoint uptime and alerts.
    pub fn to_export_json(&self) -> Result<String> {
        let endpoints: Vec<ExportEndpoint<'_>> = self
            .endpoints
            .iter()
            .map(|row| ExportEndpoint {
                id: row.endpoint.id,
                name: &row.endpoint.name,
                url: &row.endpoint.url,
                is_active: row.endpoint.is_active,
                is_down: row.endpoint.is_down,
                tier: row.tier(),
                uptime: &row.uptime,
            })
            .collect();

        let export = Export {
            generated_at: self.computed_at,
            stats: &self.stats,
            backend_stats: self.backend_stats.as_ref(),
            endpoints,
            alerts: &self.alerts,
            rejected_records: self.rejected,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Count endpoints per uptime tier, in order healthy, degraded, critical, no data.
    pub fn tier_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for row in &self.endpoints {
            let slot = match row.tier() {
                Some(UptimeTier::Healthy) => 0,
                Some(UptimeTier::Degraded) => 1,
                Some(UptimeTier::Critical) => 2,
                None => 3,
            };
            counts[slot] += 1;
        }
        counts
    }
}

#[derive(Serialize)]
struct Export<'a> {
    generated_at: DateTime<Utc>,
    stats: &'a DashboardStats,
    backend_stats: Option<&'a DashboardStats>,
    endpoints: Vec<ExportEndpoint<'a>>,
    alerts: &'a AlertDigest,
    rejected_records: usize,
}

#[derive(Serialize)]
struct ExportEndpoint<'a> {
    id: EndpointId,
    name: &'a str,
    url: &'a str,
    is_active: bool,
    is_down: bool,
    tier: Option<UptimeTier>,
    uptime: &'a UptimeWindow,
}

// Worse tiers rank higher; endpoints without data rank lowest.
fn tier_rank(tier: Option<UptimeTier>) -> u8 {
    match tier {
        None => 0,
        Some(UptimeTier::Healthy) => 1,
        Some(UptimeTier::Degraded) => 2,
        Some(UptimeTier::Critical) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn sample_json() -> &'static str {
        r#"{
            "endpoints": [
                {"id": 1, "name": "users", "url": "https://api.example.com/users", "is_down": false},
                {"id": 2, "name": "orders", "url": "https://api.example.com/orders", "is_down": true},
                {"id": 3, "name": "login", "url": "https://auth.example.com/login", "is_down": false},
                {"id": 4, "name": "broken", "url": "::"}
            ],
            "logs": [
                {"id": 1, "target": {"id": 1, "name": "users", "url": "https://api.example.com/users"},
                 "status_code": 200, "response_time": 120, "created_at": "2025-06-01T11:00:00Z"},
                {"id": 2, "target": {"id": 2, "name": "orders", "url": "https://api.example.com/orders"},
                 "status_code": 500, "response_time": 1500, "created_at": "2025-06-01T11:30:00Z"},
                {"id": 3, "target": {"id": 2, "name": "orders", "url": "https://api.example.com/orders"},
                 "status_code": 200, "response_time": 90, "created_at": "2025-05-30T11:30:00Z"},
                {"id": 4, "target": {"id": 9, "name": "legacy", "url": "https://old.example.com"},
                 "status_code": 404, "response_time": 50, "created_at": "2025-06-01T11:45:00Z"}
            ],
            "alerts": [
                {"id": 1, "target": {"id": 2, "name": "orders", "url": "https://api.example.com/orders"},
                 "created_at": "2025-06-01T11:30:00Z"}
            ],
            "stats": {"total_endpoints": 3, "up_count": 2, "average_uptime_percentage": 50.0}
        }"#
    }

    #[test]
    fn test_parse_builds_views() {
        let data = DashboardData::parse(sample_json(), &ViewSettings::default(), now()).unwrap();

        assert_eq!(data.rejected, 1);
        assert_eq!(data.endpoints.len(), 3);

        // Down first, then worst tier, then name
        let names: Vec<&str> = data.endpoints.iter().map(|r| r.endpoint.name.as_str()).collect();
        assert_eq!(names, vec!["orders", "users", "login"]);

        let orders = &data.endpoints[0];
        assert_eq!(orders.uptime.total_checks, 1, "check outside the 24h window is ignored");
        assert_eq!(orders.tier(), Some(UptimeTier::Critical));
        assert_eq!(data.endpoints[2].uptime.percentage, None);

        assert_eq!(data.stats.total, 3);
        assert_eq!(data.stats.up, 2);
        assert_eq!(data.stats.average_uptime, Some(50.0));
        assert!(!data.stats_mismatch());

        assert_eq!(data.alerts.incident_count, 1);
        assert_eq!(data.alerts.alerts[0].time_ago, "30 mins ago");

        assert_eq!(data.tier_counts(), [1, 0, 1, 1]);
    }

    #[test]
    fn test_known_endpoints_include_log_targets() {
        let data = DashboardData::parse(sample_json(), &ViewSettings::default(), now()).unwrap();
        let known: Vec<u64> = data.known_endpoints().into_iter().map(|id| id.0).collect();
        assert_eq!(known, vec![1, 2, 3, 9]);
        assert_eq!(data.targets[&EndpointId(9)].name, "legacy");
    }

    #[test]
    fn test_negative_window_is_an_error() {
        let settings = ViewSettings {
            window_hours: -5,
            ..ViewSettings::default()
        };
        assert!(DashboardData::parse(sample_json(), &settings, now()).is_err());
    }

    #[test]
    fn test_export_json() {
        let data = DashboardData::parse(sample_json(), &ViewSettings::default(), now()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&data.to_export_json().unwrap()).unwrap();

        assert_eq!(json["stats"]["total"], 3);
        assert_eq!(json["stats"]["average_uptime"], 50.0);
        assert_eq!(json["endpoints"][0]["name"], "orders");
        assert_eq!(json["endpoints"][0]["tier"], "critical");
        assert!(json["endpoints"][2]["uptime"]["percentage"].is_null());
        assert_eq!(json["alerts"]["incident_count"], 1);
        assert_eq!(json["alerts"]["alerts"][0]["display_time"], "1 Jun, 11:30 AM UTC");
        assert_eq!(json["rejected_records"], 1);
    }

    #[test]
    fn test_invalid_json() {
        assert!(DashboardData::parse("not json", &ViewSettings::default(), now()).is_err());
    }
}
