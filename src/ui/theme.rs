//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{LatencyClass, StatusClass, UptimeTier};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for degraded uptime, 4xx badges and slow responses.
    pub warning: Color,
    /// Color for critical uptime, failures and down endpoints.
    pub critical: Color,
    /// Color for healthy uptime, 2xx badges and up endpoints.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for an uptime tier; no data renders dim.
    pub fn tier_style(&self, tier: Option<UptimeTier>) -> Style {
        match tier {
            Some(UptimeTier::Healthy) => Style::default().fg(self.healthy),
            Some(UptimeTier::Degraded) => Style::default().fg(self.warning),
            Some(UptimeTier::Critical) => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            None => Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Style for an HTTP status badge.
    pub fn status_style(&self, class: StatusClass) -> Style {
        match class {
            StatusClass::Success => Style::default().fg(self.healthy),
            StatusClass::ClientError => Style::default().fg(self.warning),
            StatusClass::Failure => Style::default().fg(self.critical),
        }
    }

    /// Style for a response-time badge.
    pub fn latency_style(&self, class: LatencyClass) -> Style {
        match class {
            LatencyClass::Fast => Style::default().fg(self.healthy),
            LatencyClass::Slow => Style::default().fg(self.warning),
            LatencyClass::VerySlow => Style::default().fg(self.critical),
            LatencyClass::Unknown => Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Style for an up/down indicator.
    pub fn up_style(&self, is_up: bool) -> Style {
        if is_up {
            Style::default().fg(self.healthy)
        } else {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        }
    }
}
