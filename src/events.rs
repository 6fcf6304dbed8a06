use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::common::tab_at;
use crate::ui::logs::log_column_at;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.show_picker {
        handle_picker_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Dashboard),
        KeyCode::Char('2') => app.set_view(View::Logs),
        KeyCode::Char('3') => app.set_view(View::Alerts),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Paging (Logs view)
        KeyCode::Left | KeyCode::Char('[') | KeyCode::Char('h') => {
            if app.current_view == View::Logs {
                app.prev_page();
            }
        }
        KeyCode::Right | KeyCode::Char(']') | KeyCode::Char('l') => {
            if app.current_view == View::Logs {
                app.next_page();
            }
        }

        // Sorting and filtering (Logs view)
        KeyCode::Char('s') if app.current_view == View::Logs => app.cycle_sort(),
        KeyCode::Char('S') if app.current_view == View::Logs => app.toggle_sort_direction(),
        KeyCode::Char('f') if app.current_view == View::Logs => app.cycle_status_filter(),
        KeyCode::Char('p') => {
            app.set_view(View::Logs);
            app.open_picker();
        }

        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => match app.force_reload(Utc::now()) {
            Ok(_) => app.set_status_message("Reloaded".to_string()),
            Err(e) => app.set_status_message(format!("Reload failed: {}", e)),
        },

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from("pingwatch_export.json");
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while the endpoint picker is open
fn handle_picker_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('q') => {
            app.close_picker();
        }
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char(' ') => app.toggle_picker_endpoint(),
        KeyCode::Char('a') => app.toggle_all_endpoints(),
        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Tabs sit on row 1, after the header
            if clicked_row == 1 {
                if let Some(view) = tab_at(mouse.column) {
                    app.set_view(view);
                }
                return;
            }

            if app.show_picker {
                return;
            }

            // Tables sit under a border row; the Dashboard adds its stat cards
            let table_top = match app.current_view {
                View::Dashboard => content_start_row + 3,
                View::Logs | View::Alerts => content_start_row,
            };
            let header_row = table_top + 1;

            if clicked_row == header_row && app.current_view == View::Logs {
                if let Some(key) = log_column_at(mouse.column) {
                    app.click_sort(key);
                }
            } else if clicked_row > header_row {
                let item_row = (clicked_row - header_row - 1) as usize;
                app.select_first();
                app.select_next_n(item_row);
            }
        }

        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}
