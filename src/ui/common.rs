//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::UptimeTier;

/// Render the header bar with the dashboard-wide stats.
///
/// Displays: overall indicator, up/down counts, average uptime, incidents.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(" PINGWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let stats = &data.stats;
    let overall = stats.average_uptime.map(UptimeTier::classify);
    let indicator_style = if stats.down > 0 {
        app.theme.tier_style(Some(UptimeTier::Critical))
    } else {
        app.theme.tier_style(overall)
    };

    let mut spans = vec![
        Span::styled(" ● ", indicator_style),
        Span::styled("PINGWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(stats.total.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" endpoints │ "),
        Span::styled(stats.up.to_string(), Style::default().fg(app.theme.healthy)),
        Span::raw(" up "),
        if stats.down > 0 {
            Span::styled(
                stats.down.to_string(),
                Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" down │ avg "),
        Span::styled(stats.display_average(), app.theme.tier_style(overall)),
        Span::raw(format!(" ({}h) │ ", app.settings.window_hours)),
        Span::raw(data.alerts.incident_label()),
    ];

    if data.stats_mismatch() {
        spans.push(Span::styled(
            " │ backend stats differ",
            Style::default().fg(app.theme.warning),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn tab_title(index: usize, view: View) -> String {
    format!(" {}:{} ", index + 1, view.label())
}

/// Map a terminal column on the tab bar to the view under it.
pub fn tab_at(column: u16) -> Option<View> {
    let mut start = 0u16;
    for (i, view) in View::ALL.into_iter().enumerate() {
        // One cell of padding each side, then the divider
        let width = tab_title(i, view).chars().count() as u16 + 2;
        if column >= start && column < start + width {
            return Some(view);
        }
        start += width + 1;
    }
    None
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(tab_title(i, *view)))
        .collect();

    let selected = View::ALL
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last update, rejected records, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref data) = app.data {
        let elapsed = data.last_updated.elapsed();

        let controls = if app.show_picker {
            "↑↓:move Space:toggle a:all Esc:close"
        } else {
            match app.current_view {
                View::Dashboard => "↑↓:select Tab:switch r:reload e:export ?:help q:quit",
                View::Logs => "←→:page s:sort S:reverse f:status p:endpoints ?:help q:quit",
                View::Alerts => "↑↓:select Tab:switch r:reload ?:help q:quit",
            }
        };

        let rejected = if data.rejected > 0 {
            format!(" | {} rejected", data.rejected)
        } else {
            String::new()
        };
        let error = match app.load_error {
            Some(ref err) => format!(" | {}", err),
            None => String::new(),
        };

        format!(
            " {} | Updated {:.1}s ago{}{} | {}",
            app.source_description(),
            elapsed.as_secs_f64(),
            rejected,
            error,
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Centered rectangle of at most `width`×`height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  Tab/1-3     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Logs"),
        Line::from("  ←/→ [ ]     Previous/next page"),
        Line::from("  s           Cycle sort column"),
        Line::from("  S           Toggle sort direction"),
        Line::from("  f           Cycle status filter"),
        Line::from("  p           Pick endpoints"),
        Line::from("  Space / a   Toggle one / all (picker)"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Reload data"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let help_area = centered(area, 44, 26);

    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_at() {
        assert_eq!(tab_at(0), Some(View::Dashboard));
        assert_eq!(tab_at(14), Some(View::Dashboard));
        assert_eq!(tab_at(15), None);
        assert_eq!(tab_at(16), Some(View::Logs));
        assert_eq!(tab_at(25), Some(View::Logs));
        assert_eq!(tab_at(27), Some(View::Alerts));
        assert_eq!(tab_at(38), Some(View::Alerts));
        assert_eq!(tab_at(39), None);
    }

    #[test]
    fn test_centered_fits_area() {
        let area = Rect::new(0, 0, 40, 10);
        let inner = centered(area, 70, 20);
        assert_eq!(inner, Rect::new(2, 1, 36, 8));
        assert_eq!(centered(area, 10, 4), Rect::new(15, 3, 10, 4));
    }
}
