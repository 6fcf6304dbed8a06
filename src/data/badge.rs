//! Status and latency badges for log rows.

use serde::{Deserialize, Serialize};

/// Colour class of an HTTP status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusClass {
    Success,
    ClientError,
    /// 5xx, 1xx/3xx and missing codes all render as failures.
    Failure,
}

impl StatusClass {
    pub fn of(status: Option<u16>) -> Self {
        match status {
            Some(200..=299) => StatusClass::Success,
            Some(400..=499) => StatusClass::ClientError,
            _ => StatusClass::Failure,
        }
    }
}

/// Badge text such as `"404 Not Found"`.
pub fn status_text(status: Option<u16>) -> String {
    match status {
        None => "No response".to_string(),
        Some(code) => {
            let message = match code {
                200 => "OK",
                404 => "Not Found",
                500 => "Internal Server Error",
                _ => "Unknown",
            };
            format!("{} {}", code, message)
        }
    }
}

/// Latency cut-offs for the response-time badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyThresholds {
    /// Above this many milliseconds the badge turns yellow.
    pub warn_ms: u64,
    /// Above this many milliseconds the badge turns red.
    pub critical_ms: u64,
}

impl Default for LatencyThresholds {
    fn default() -> Self {
        Self {
            warn_ms: 300,
            critical_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LatencyClass {
    Fast,
    Slow,
    VerySlow,
    Unknown,
}

impl LatencyThresholds {
    pub fn classify(&self, response_time: Option<u64>) -> LatencyClass {
        match response_time {
            None => LatencyClass::Unknown,
            Some(ms) if ms > self.critical_ms => LatencyClass::VerySlow,
            Some(ms) if ms > self.warn_ms => LatencyClass::Slow,
            Some(_) => LatencyClass::Fast,
        }
    }
}

pub fn latency_text(response_time: Option<u64>) -> String {
    match response_time {
        Some(ms) => format!("{}ms", ms),
        None => "-".to_string(),
    }
}
