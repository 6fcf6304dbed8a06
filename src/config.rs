//! Layered settings: built-in defaults, an optional TOML file, `PINGWATCH_*`
//! environment variables and finally command-line flags.
//!
//! ```toml
//! refresh_secs = 5
//! window_hours = 24
//! page_size = 20
//! zone_offset = "+05:30"
//! zone_label = "IST"
//! latency_warn_ms = 300
//! latency_crit_ms = 1000
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::data::{DisplayZone, LatencyThresholds, PageRequest, TrailingWindow, ViewSettings};

/// Flags given on the command line, applied over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub refresh_secs: Option<u64>,
    pub window_hours: Option<i64>,
    pub page_size: Option<usize>,
}

/// Resolved settings before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub refresh_secs: u64,
    pub window_hours: i64,
    pub page_size: usize,
    pub zone_offset: String,
    pub zone_label: String,
    pub latency_warn_ms: u64,
    pub latency_crit_ms: u64,
}

impl Settings {
    /// Load every layer. A missing file is not an error.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(path, overrides, Environment::with_prefix("PINGWATCH"))
    }

    fn load_with_env(path: Option<&Path>, overrides: &Overrides, env: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("refresh_secs", 2)?
            .set_default("window_hours", 24)?
            .set_default("page_size", 20)?
            .set_default("zone_offset", "+00:00")?
            .set_default("zone_label", "UTC")?
            .set_default("latency_warn_ms", 300)?
            .set_default("latency_crit_ms", 1000)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let config = builder
            .add_source(env.try_parsing(true))
            .set_override_option("refresh_secs", overrides.refresh_secs.map(|v| v as i64))?
            .set_override_option("window_hours", overrides.window_hours)?
            .set_override_option("page_size", overrides.page_size.map(|v| v as i64))?
            .build()
            .context("Failed to load settings")?;

        Ok(config.try_deserialize()?)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    /// Validate into the parameters the views run with.
    pub fn view_settings(&self) -> Result<ViewSettings> {
        TrailingWindow::new(self.window_hours)?;
        PageRequest::new(self.page_size, 0)?;
        if self.latency_warn_ms > self.latency_crit_ms {
            bail!(
                "latency_warn_ms ({}) must not exceed latency_crit_ms ({})",
                self.latency_warn_ms,
                self.latency_crit_ms
            );
        }

        Ok(ViewSettings {
            window_hours: self.window_hours,
            zone: DisplayZone::parse(&self.zone_offset, self.zone_label.as_str())?,
            latency: LatencyThresholds {
                warn_ms: self.latency_warn_ms,
                critical_ms: self.latency_crit_ms,
            },
            page_size: self.page_size,
        })
    }
}
