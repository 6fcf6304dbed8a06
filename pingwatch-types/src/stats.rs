//! Backend-computed dashboard aggregates.

use serde::{Deserialize, Serialize};

use crate::RecordError;

/// The `/target/dashboard-stats` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsRecord {
    pub total_endpoints: u64,
    pub up_count: u64,
    /// Mean 24h uptime. The backend reports `0.0` when nothing was checked.
    pub average_uptime_percentage: f64,
}

/// Wire form of [`StatsRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStatsRecord {
    #[serde(default, deserialize_with = "crate::lenient::int")]
    pub total_endpoints: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::int")]
    pub up_count: Option<i64>,
    #[serde(default)]
    pub average_uptime_percentage: Option<f64>,
}

impl TryFrom<RawStatsRecord> for StatsRecord {
    type Error = RecordError;

    fn try_from(raw: RawStatsRecord) -> Result<Self, Self::Error> {
        let total_endpoints = crate::lenient::id("total_endpoints", raw.total_endpoints)?;
        let up_count = crate::lenient::id("up_count", raw.up_count)?.min(total_endpoints);
        let average_uptime_percentage = raw
            .average_uptime_percentage
            .filter(|p| p.is_finite())
            .unwrap_or(0.0)
            .clamp(0.0, 100.0);

        Ok(Self {
            total_endpoints,
            up_count,
            average_uptime_percentage,
        })
    }
}
