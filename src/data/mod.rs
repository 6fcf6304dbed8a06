//! Derived views over monitoring snapshots.
//!
//! This module turns validated endpoints, check logs and alerts into the
//! figures and rows the dashboard displays. Everything here is a pure
//! function of its inputs plus an explicit `now`.
//!
//! ## Submodules
//!
//! - [`uptime`]: Per-endpoint success percentage over a trailing window
//! - [`logs`]: Filter, sort and paginate the check log ([`LogQuery`])
//! - [`alerts`]: Newest-first alert digest with relative and absolute times
//! - [`stats`]: Header aggregates ([`DashboardStats`])
//! - [`badge`]: Status-code and latency badge classes
//!
//! ## Data Flow
//!
//! ```text
//! RawSnapshot (JSON)
//!        │
//!        ▼
//! Snapshot::from_raw()  ──▶ Rejection (logged, counted)
//!        │
//!        ▼
//! DashboardData::from_snapshot()
//!        │
//!        ├──▶ UptimeWindow::summarize() per endpoint
//!        ├──▶ DashboardStats::reduce()
//!        └──▶ AlertDigest::aggregate()
//!
//! LogQuery::run() is evaluated per frame against the snapshot's logs.
//! ```

pub mod alerts;
pub mod badge;
mod dashboard;
pub mod logs;
pub mod stats;
pub mod uptime;

#[cfg(test)]
pub(crate) mod testing;

pub use alerts::{time_ago, AlertDigest, AnnotatedAlert, DisplayZone};
pub use badge::{LatencyClass, LatencyThresholds, StatusClass};
pub use dashboard::{DashboardData, EndpointRow, ViewSettings};
pub use logs::{LogQuery, LogSort, Page, PageRequest, SortDirection, SortKey, StatusFilter};
pub use stats::DashboardStats;
pub use uptime::{TrailingWindow, UptimeTier, UptimeWindow};
