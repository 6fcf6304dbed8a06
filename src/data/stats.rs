//! Dashboard-wide aggregates.

use serde::Serialize;

use pingwatch_types::{Endpoint, StatsRecord};

use super::uptime::UptimeWindow;

/// Header figures: endpoint counts and the mean uptime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub up: usize,
    pub down: usize,
    /// Mean of the defined uptime percentages, two decimals. `None` when no
    /// endpoint had checks in its window.
    pub average_uptime: Option<f64>,
}

impl DashboardStats {
    /// Reduce endpoints and their uptime windows.
    ///
    /// Endpoints without data are left out of the average entirely, not
    /// counted as 0%.
    pub fn reduce<'a, I>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = (&'a Endpoint, &'a UptimeWindow)>,
    {
        let mut total = 0;
        let mut up = 0;
        let mut sum = 0.0;
        let mut counted = 0usize;

        for (endpoint, window) in endpoints {
            total += 1;
            if endpoint.is_up() {
                up += 1;
            }
            if let Some(p) = window.percentage {
                sum += p;
                counted += 1;
            }
        }

        let average_uptime = (counted > 0).then(|| (sum / counted as f64 * 100.0).round() / 100.0);

        Self {
            total,
            up,
            down: total - up,
            average_uptime,
        }
    }

    /// Average for display, `"no data"` when undefined.
    pub fn display_average(&self) -> String {
        match self.average_uptime {
            Some(p) => format!("{:.2}%", p),
            None => "no data".to_string(),
        }
    }

    /// Whether a backend-supplied aggregate disagrees on the counts.
    pub fn disagrees_with(&self, record: &StatsRecord) -> bool {
        self.total as u64 != record.total_endpoints || self.up as u64 != record.up_count
    }
}

impl From<&StatsRecord> for DashboardStats {
    fn from(record: &StatsRecord) -> Self {
        let total = record.total_endpoints as usize;
        let up = (record.up_count as usize).min(total);
        Self {
            total,
            up,
            down: total - up,
            // The backend reports 0.0 for "nothing checked"; with no endpoints
            // that can only mean no data.
            average_uptime: (total > 0).then_some(record.average_uptime_percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{check, endpoint};
    use crate::data::uptime::TrailingWindow;
    use chrono::Utc;
    use pingwatch_types::EndpointId;

    fn window(id: u64, codes: &[u16]) -> UptimeWindow {
        let checks: Vec<_> = codes
            .iter()
            .enumerate()
            .map(|(i, code)| check(i as u64, id, Some(*code), 1, Utc::now()))
            .collect();
        UptimeWindow::summarize(EndpointId(id), &checks, &TrailingWindow::default())
    }

    #[test]
    fn test_up_down_counts() {
        let endpoints = [endpoint(1, false), endpoint(2, true)];
        let windows = [window(1, &[200]), window(2, &[500])];
        let stats = DashboardStats::reduce(endpoints.iter().zip(windows.iter()));

        assert_eq!(stats.total, 2);
        assert_eq!(stats.up, 1);
        assert_eq!(stats.down, 1);
        assert_eq!(stats.average_uptime, Some(50.0));
    }

    #[test]
    fn test_no_data_excluded_from_average() {
        let endpoints = [endpoint(1, false), endpoint(2, false), endpoint(3, false)];
        let windows = [window(1, &[200, 200, 500]), window(2, &[200]), window(3, &[])];
        let stats = DashboardStats::reduce(endpoints.iter().zip(windows.iter()));

        // (66.7 + 100) / 2
        assert_eq!(stats.average_uptime, Some(83.35));
        assert_eq!(stats.display_average(), "83.35%");
    }

    #[test]
    fn test_empty_set() {
        let stats = DashboardStats::reduce(std::iter::empty::<(&Endpoint, &UptimeWindow)>());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.up, 0);
        assert_eq!(stats.down, 0);
        assert_eq!(stats.average_uptime, None);
        assert_eq!(stats.display_average(), "no data");
    }

    #[test]
    fn test_from_backend_record() {
        let record = StatsRecord {
            total_endpoints: 5,
            up_count: 4,
            average_uptime_percentage: 97.18,
        };
        let stats = DashboardStats::from(&record);
        assert_eq!(stats.down, 1);
        assert_eq!(stats.average_uptime, Some(97.18));

        let local = DashboardStats::reduce(std::iter::empty::<(&Endpoint, &UptimeWindow)>());
        assert!(local.disagrees_with(&record));
        assert!(!stats.disagrees_with(&record));
    }
}
