//! Logs view rendering.
//!
//! Displays one page of the filtered, sorted check log with status and
//! latency badges, the pagination footer and the endpoint picker overlay.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Row,
        Table, TableState,
    },
    Frame,
};

use crate::app::App;
use crate::data::badge::{latency_text, status_text};
use crate::data::{time_ago, Page, SortKey, StatusClass};
use crate::ui::common::centered;

/// Log table columns in display order with their widths.
pub const LOG_COLUMNS: [(SortKey, u16); 5] = [
    (SortKey::Timestamp, 22),
    (SortKey::EndpointName, 20),
    (SortKey::EndpointUrl, 36),
    (SortKey::StatusCode, 26),
    (SortKey::ResponseTime, 12),
];

/// Left border plus the highlight symbol column.
const TABLE_INSET: u16 = 3;

/// Trailing relative-time column, not sortable.
const AGE_WIDTH: u16 = 14;

/// Map a terminal column inside the log table to the sort key under it.
pub fn log_column_at(column: u16) -> Option<SortKey> {
    let mut start = TABLE_INSET;
    for (key, width) in LOG_COLUMNS {
        if column >= start && column < start + width {
            return Some(key);
        }
        // Column spacing is one cell
        start += width + 1;
    }
    None
}

/// Render the Logs view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Min(5),    // Table
        Constraint::Length(1), // Pagination
    ])
    .split(area);

    let page = match app.log_page() {
        Ok(Some(page)) => page,
        Ok(None) => return,
        Err(e) => {
            let paragraph = Paragraph::new(format!(" {}", e))
                .style(Style::default().fg(app.theme.critical));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    render_table(frame, app, &page, chunks[0]);
    render_pagination(frame, app, &page, chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, page: &Page<'_>, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let header = Row::new(vec![
        Cell::from(format_header("Timestamp", SortKey::Timestamp, app)),
        Cell::from(format_header("Endpoint", SortKey::EndpointName, app)),
        Cell::from(format_header("URL", SortKey::EndpointUrl, app)),
        Cell::from(format_header("Status", SortKey::StatusCode, app)),
        Cell::from(format_header("Response", SortKey::ResponseTime, app)),
        Cell::from("Age"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = page
        .rows
        .iter()
        .map(|record| {
            let status_style = app.theme.status_style(StatusClass::of(record.status_code));
            let latency_style = app
                .theme
                .latency_style(app.settings.latency.classify(record.response_time));

            Row::new(vec![
                Cell::from(app.settings.zone.format(record.created_at)),
                Cell::from(record.target.name.clone()),
                Cell::from(record.target.url.clone()),
                Cell::from(status_text(record.status_code)).style(status_style),
                Cell::from(latency_text(record.response_time)).style(latency_style),
                Cell::from(time_ago(record.created_at, data.computed_at))
                    .style(Style::default().add_modifier(Modifier::DIM)),
            ])
        })
        .collect();

    let widths: Vec<Constraint> = LOG_COLUMNS
        .iter()
        .map(|(_, width)| Constraint::Length(*width))
        .chain([Constraint::Length(AGE_WIDTH)])
        .collect();

    let title = format!(
        " Logs [{}] [{}] [sort {} {}] ",
        app.log_query.selection_label(),
        app.log_query.status.label(),
        app.log_query.sort.key.label(),
        app.log_query.sort.direction.arrow(),
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if page.rows.is_empty() {
        let message = if page.total_count == 0 {
            " No logs found"
        } else {
            " Page is past the last result"
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(block),
            area,
        );
        return;
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .highlight_spacing(HighlightSpacing::Always)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_log_index.min(page.rows.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_pagination(frame: &mut Frame, app: &App, page: &Page<'_>, area: Rect) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let arrow = |enabled: bool, text: &'static str| {
        if enabled {
            Span::styled(text, Style::default().fg(app.theme.highlight))
        } else {
            Span::styled(text, dim)
        }
    };

    let line = Line::from(vec![
        Span::raw(format!(
            " Showing {} to {} of {} results ",
            page.first_row(),
            page.last_row(),
            page.total_count
        )),
        arrow(page.has_prev(), "◀ "),
        Span::raw(format!(
            "page {} of {}",
            page.page_index + 1,
            page.page_count.max(1)
        )),
        arrow(page.has_next(), " ▶"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn format_header(name: &str, key: SortKey, app: &App) -> Span<'static> {
    if app.log_query.sort.key == key {
        Span::raw(format!("{}{}", name, app.log_query.sort.direction.arrow()))
    } else {
        Span::raw(name.to_string())
    }
}

/// Render the endpoint picker as a modal overlay.
pub fn render_picker(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let known = data.known_endpoints();
    let all_selected = app.log_query.all_selected(&known);

    let items: Vec<ListItem> = data
        .targets
        .values()
        .map(|target| {
            let checked = app.log_query.selected.contains(&target.id);
            let mark = if checked { "[x]" } else { "[ ]" };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} {} ", mark, target.name)),
                Span::styled(target.url.clone(), Style::default().add_modifier(Modifier::DIM)),
            ]))
        })
        .collect();

    let title = format!(
        " Endpoints ({}) a:{} ",
        app.log_query.selection_label(),
        if all_selected { "deselect all" } else { "select all" }
    );

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.highlight)),
        )
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let height = (data.targets.len() as u16).saturating_add(2).max(5);
    let picker_area = centered(area, 70, height);

    let mut state = ListState::default();
    state.select((!data.targets.is_empty()).then_some(app.picker_cursor));

    frame.render_widget(Clear, picker_area);
    frame.render_stateful_widget(list, picker_area, &mut state);
}
