//! Dashboard view rendering.
//!
//! Stat cards across the top, the endpoint table below, and a detail card
//! for the selected endpoint.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{EndpointRow, UptimeTier};

/// Render the Dashboard view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Stat cards
        Constraint::Min(5),    // Endpoint table
        Constraint::Length(4), // Selected endpoint card
    ])
    .split(area);

    render_cards(frame, app, chunks[0]);

    let header = Row::new(vec![
        Cell::from("Endpoint"),
        Cell::from("URL"),
        Cell::from("State"),
        Cell::from(format!("Uptime {}h", app.settings.window_hours)),
        Cell::from("Checks"),
        Cell::from("Tier"),
        Cell::from("Active"),
        Cell::from("Email"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = data
        .endpoints
        .iter()
        .map(|row| {
            let tier_style = app.theme.tier_style(row.tier());
            let (state, state_style) = if row.endpoint.is_up() {
                ("▲ Up", app.theme.up_style(true))
            } else {
                ("▼ Down", app.theme.up_style(false))
            };

            Row::new(vec![
                Cell::from(row.endpoint.name.clone()),
                Cell::from(row.endpoint.url.clone()),
                Cell::from(state).style(state_style),
                Cell::from(row.uptime.display_percentage()).style(tier_style),
                Cell::from(format!(
                    "{}/{}",
                    row.uptime.successful_checks, row.uptime.total_checks
                )),
                Cell::from(tier_label(row.tier())).style(tier_style),
                Cell::from(flag(row.endpoint.is_active)),
                Cell::from(flag(row.endpoint.send_email)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2), // Endpoint
        Constraint::Fill(3), // URL
        Constraint::Min(7),  // State
        Constraint::Min(11), // Uptime
        Constraint::Min(8),  // Checks
        Constraint::Min(9),  // Tier
        Constraint::Min(6),  // Active
        Constraint::Min(5),  // Email
    ];

    let selected = app
        .selected_endpoint_index
        .min(data.endpoints.len().saturating_sub(1));

    let position_info = if data.endpoints.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", selected + 1, data.endpoints.len())
    };
    let [healthy, degraded, critical, no_data] = data.tier_counts();
    let title = format!(
        " Endpoints ({} healthy, {} degraded, {} critical, {} no data){} ",
        healthy, degraded, critical, no_data, position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select((!data.endpoints.is_empty()).then_some(selected));
    frame.render_stateful_widget(table, chunks[1], &mut state);

    render_endpoint_card(frame, app, data.endpoints.get(selected), chunks[2]);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };
    let stats = &data.stats;

    let cells = Layout::horizontal([Constraint::Fill(1); 4]).split(area);
    let cards = [
        ("Total Endpoints", stats.total.to_string(), Style::default()),
        ("Up", stats.up.to_string(), app.theme.up_style(true)),
        (
            "Down",
            stats.down.to_string(),
            if stats.down > 0 {
                app.theme.up_style(false)
            } else {
                Style::default()
            },
        ),
        (
            "Average Uptime",
            stats.display_average(),
            app.theme.tier_style(stats.average_uptime.map(UptimeTier::classify)),
        ),
    ];

    for ((title, value, style), cell) in cards.into_iter().zip(cells.iter()) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));
        let paragraph =
            Paragraph::new(Span::styled(value, style.add_modifier(Modifier::BOLD))).block(block);
        frame.render_widget(paragraph, *cell);
    }
}

fn render_endpoint_card(frame: &mut Frame, app: &App, row: Option<&EndpointRow>, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(row) = row else {
        frame.render_widget(Paragraph::new(" No endpoints").block(block), area);
        return;
    };

    let uptime = &row.uptime;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", row.endpoint.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} ", row.endpoint.id)),
            Span::styled(
                row.endpoint.url.clone(),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Uptime: "),
            Span::styled(uptime.display_percentage(), app.theme.tier_style(row.tier())),
            Span::raw(format!(
                " over {}h │ {} successful of {} checks",
                uptime.window_hours, uptime.successful_checks, uptime.total_checks
            )),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn tier_label(tier: Option<UptimeTier>) -> &'static str {
    tier.map_or("-", |t| t.label())
}

fn flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
