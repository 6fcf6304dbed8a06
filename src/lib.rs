//! # pingwatch
//!
//! A terminal dashboard and library for endpoint uptime monitoring.
//!
//! This crate turns the raw records an uptime backend produces (endpoints,
//! ping logs, alerts) into the views an operator reads: per-endpoint uptime
//! with a health tier, a filterable and paginated log, a newest-first alert
//! digest and dashboard-wide totals.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(derived views)│(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | ChannelSource                  │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, log query state and the
//!   auto-refresh handle
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with file
//!   polling and channel-based input
//! - **[`data`]**: The pure computations: [`UptimeWindow`], [`LogQuery`],
//!   [`AlertDigest`], [`DashboardStats`], gathered by [`DashboardData`]
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (defaults, TOML, environment, flags)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a snapshot file exported by the backend
//! pingwatch --file snapshot.json
//!
//! # Write the derived views as JSON and exit
//! pingwatch --file snapshot.json --export report.json
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use std::time::Duration;
//! use pingwatch::{App, AutoRefresh, FileSource, ViewSettings};
//!
//! let source = Box::new(FileSource::new("snapshot.json"));
//! let refresh = AutoRefresh::new(Duration::from_secs(5));
//! let app = App::new(source, ViewSettings::default(), Box::new(refresh));
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use std::time::Duration;
//! use pingwatch::{App, AutoRefresh, ChannelSource, ViewSettings};
//! use pingwatch_types::Snapshot;
//!
//! let (tx, source) = ChannelSource::create("https://monitor.example.com");
//! let app = App::new(
//!     Box::new(source),
//!     ViewSettings::default(),
//!     Box::new(AutoRefresh::new(Duration::from_secs(5))),
//! );
//! tx.send(Snapshot::default()).unwrap();
//! ```
//!
//! ### Computing views directly
//!
//! ```
//! use chrono::Utc;
//! use pingwatch::{DashboardData, ViewSettings};
//!
//! let json = r#"{"endpoints": [], "logs": [], "alerts": []}"#;
//! let data = DashboardData::parse(json, &ViewSettings::default(), Utc::now()).unwrap();
//! assert_eq!(data.stats.total, 0);
//! assert_eq!(data.stats.display_average(), "no data");
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, AutoRefresh, Suspend, View};
pub use config::{Overrides, Settings};
pub use data::{
    AlertDigest, DashboardData, DashboardStats, DisplayZone, LogQuery, Page, UptimeTier,
    UptimeWindow, ViewSettings,
};
pub use error::CoreError;
pub use source::{ChannelSource, DataSource, FileSource};
