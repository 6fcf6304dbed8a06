//! # pingwatch-types
//!
//! Record schema for the pingwatch dashboard. These are the JSON shapes the
//! monitoring backend hands out (endpoints, ping logs, alerts and aggregate
//! stats) together with their validated Rust counterparts.
//!
//! ## Raw and validated records
//!
//! Every record comes in two flavours:
//!
//! - a `Raw*` mirror that deserializes leniently (all fields optional, numeric
//!   fields tolerate garbage), and
//! - a validated type built with `TryFrom<Raw*>`.
//!
//! Structural problems (missing id, unparseable timestamp, invalid URL) reject
//! the record with a [`RecordError`]. Data-quality problems are normalised
//! instead: a missing or nonsensical status code becomes `None`, which every
//! consumer treats as a failed check.
//!
//! ## Example
//!
//! ```rust
//! use pingwatch_types::{RawSnapshot, Snapshot};
//!
//! let json = r#"{
//!     "endpoints": [
//!         {"id": 1, "name": "api", "url": "https://api.example.com/health",
//!          "is_active": true, "send_email": false, "is_down": false}
//!     ],
//!     "logs": [
//!         {"id": 10, "target": {"id": 1, "name": "api", "url": "https://api.example.com/health"},
//!          "status_code": 200, "response_time": 128, "created_at": "2025-06-01T10:45:23Z"}
//!     ]
//! }"#;
//!
//! let raw: RawSnapshot = serde_json::from_str(json).unwrap();
//! let (snapshot, rejected) = Snapshot::from_raw(raw);
//! assert!(rejected.is_empty());
//! assert_eq!(snapshot.endpoints.len(), 1);
//! assert_eq!(snapshot.logs[0].status_code, Some(200));
//! ```

mod alert;
mod check;
mod endpoint;
mod error;
mod ids;
mod lenient;
mod snapshot;
mod stats;

pub use alert::{AlertEvent, RawAlertEvent};
pub use check::{CheckRecord, RawCheckRecord};
pub use endpoint::{Endpoint, RawEndpoint, RawTargetRef, TargetRef};
pub use error::RecordError;
pub use ids::{EndpointId, RecordId};
pub use snapshot::{RawSnapshot, RecordKind, Rejection, Snapshot};
pub use stats::{RawStatsRecord, StatsRecord};

/// Instants are always carried in UTC; display zones are applied at render time.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
