//! Recent alerts view rendering.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Render the newest-first alert list with the incident count in the title.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };
    let digest = &data.alerts;

    let block = Block::default()
        .title(format!(" Recent Alerts [{}] ", digest.incident_label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(if digest.is_empty() {
            app.theme.border
        } else {
            app.theme.critical
        }));

    if digest.is_empty() {
        let paragraph = Paragraph::new(" No recent alerts")
            .style(Style::default().fg(app.theme.healthy))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Endpoint"),
        Cell::from("URL"),
        Cell::from("When"),
        Cell::from(format!("Time ({})", app.settings.zone.label())),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = digest
        .alerts
        .iter()
        .map(|alert| {
            Row::new(vec![
                Cell::from(alert.endpoint_name.clone())
                    .style(Style::default().fg(app.theme.critical)),
                Cell::from(alert.endpoint_url.clone()),
                Cell::from(alert.time_ago.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(alert.display_time.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Min(14),
        Constraint::Min(24),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_alert_index.min(digest.alerts.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}
