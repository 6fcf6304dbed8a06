//! Snapshot - everything the dashboard needs to render, fetched in one go.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    AlertEvent, CheckRecord, Endpoint, RawAlertEvent, RawCheckRecord, RawEndpoint, RawStatsRecord,
    RecordError, StatsRecord,
};

/// A validated, point-in-time view of the backend's records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub endpoints: Vec<Endpoint>,
    pub logs: Vec<CheckRecord>,
    pub alerts: Vec<AlertEvent>,
    /// Aggregates as computed by the backend, when it sent them.
    pub stats: Option<StatsRecord>,
}

/// Wire form of [`Snapshot`]. Every collection defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub endpoints: Vec<RawEndpoint>,
    #[serde(default)]
    pub logs: Vec<RawCheckRecord>,
    #[serde(default)]
    pub alerts: Vec<RawAlertEvent>,
    #[serde(default)]
    pub stats: Option<RawStatsRecord>,
}

/// Which collection a rejected record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Endpoint,
    Log,
    Alert,
    Stats,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Endpoint => "endpoint",
            RecordKind::Log => "log",
            RecordKind::Alert => "alert",
            RecordKind::Stats => "stats",
        })
    }
}

/// A record dropped during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RecordKind,
    /// Position in the raw collection.
    pub index: usize,
    pub error: RecordError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.kind, self.index, self.error)
    }
}

impl Snapshot {
    /// Validate every raw record, keeping the good ones.
    ///
    /// Malformed records never poison the snapshot; they are returned
    /// alongside it so the caller can report them. Endpoint identifiers must
    /// be unique: later duplicates are rejected.
    pub fn from_raw(raw: RawSnapshot) -> (Self, Vec<Rejection>) {
        let mut rejected = Vec::new();

        let mut seen = HashSet::new();
        let mut endpoints = Vec::with_capacity(raw.endpoints.len());
        for (index, r) in raw.endpoints.into_iter().enumerate() {
            match Endpoint::try_from(r) {
                Ok(e) if !seen.insert(e.id) => rejected.push(Rejection {
                    kind: RecordKind::Endpoint,
                    index,
                    error: RecordError::DuplicateId(e.id.0),
                }),
                Ok(e) => endpoints.push(e),
                Err(error) => rejected.push(Rejection {
                    kind: RecordKind::Endpoint,
                    index,
                    error,
                }),
            }
        }

        let logs = validate_all(raw.logs, RecordKind::Log, &mut rejected);
        let alerts = validate_all(raw.alerts, RecordKind::Alert, &mut rejected);

        let stats = raw.stats.and_then(|s| match StatsRecord::try_from(s) {
            Ok(stats) => Some(stats),
            Err(error) => {
                rejected.push(Rejection {
                    kind: RecordKind::Stats,
                    index: 0,
                    error,
                });
                None
            }
        });

        (
            Self {
                endpoints,
                logs,
                alerts,
                stats,
            },
            rejected,
        )
    }

    /// Check whether the snapshot holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty() && self.logs.is_empty() && self.alerts.is_empty()
    }
}

fn validate_all<R, T>(raw: Vec<R>, kind: RecordKind, rejected: &mut Vec<Rejection>) -> Vec<T>
where
    T: TryFrom<R, Error = RecordError>,
{
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, r)| match T::try_from(r) {
            Ok(record) => Some(record),
            Err(error) => {
                rejected.push(Rejection { kind, index, error });
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EndpointId;

    #[test]
    fn test_from_raw_partitions_records() {
        let json = r#"{
            "endpoints": [
                {"id": 1, "name": "api", "url": "https://api.example.com", "is_down": false},
                {"id": 1, "name": "dupe", "url": "https://dupe.example.com"},
                {"id": 2, "name": "bad", "url": ""}
            ],
            "logs": [
                {"id": 1, "target": {"id": 1, "name": "api", "url": "https://api.example.com"},
                 "status_code": 200, "response_time": 90, "created_at": "2025-06-01T10:00:00Z"},
                {"id": 2, "target": {"id": 1, "name": "api", "url": "https://api.example.com"},
                 "status_code": 500, "created_at": "not a date"}
            ],
            "alerts": [
                {"id": 9, "target": {"id": 1, "name": "api", "url": "https://api.example.com"},
                 "created_at": "2025-06-01T09:00:00"}
            ],
            "stats": {"total_endpoints": 1, "up_count": 1, "average_uptime_percentage": 99.5}
        }"#;

        let raw: RawSnapshot = serde_json::from_str(json).unwrap();
        let (snapshot, rejected) = Snapshot::from_raw(raw);

        assert_eq!(snapshot.endpoints.len(), 1);
        assert_eq!(snapshot.endpoints[0].id, EndpointId(1));
        assert_eq!(snapshot.logs.len(), 1);
        assert_eq!(snapshot.alerts.len(), 1);
        assert_eq!(snapshot.stats.as_ref().unwrap().up_count, 1);

        assert_eq!(rejected.len(), 3);
        assert_eq!(rejected[0].error, RecordError::DuplicateId(1));
        assert_eq!(rejected[1].kind, RecordKind::Endpoint);
        assert_eq!(rejected[1].index, 2);
        assert_eq!(rejected[2].kind, RecordKind::Log);
        assert_eq!(rejected[2].to_string(), "log[1]: invalid timestamp `not a date`");
    }

    #[test]
    fn test_empty_document() {
        let raw: RawSnapshot = serde_json::from_str("{}").unwrap();
        let (snapshot, rejected) = Snapshot::from_raw(raw);
        assert!(snapshot.is_empty());
        assert!(snapshot.stats.is_none());
        assert!(rejected.is_empty());
    }
}
