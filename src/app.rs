//! Application state and navigation logic.

use std::fmt::Debug;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use pingwatch_types::EndpointId;

use crate::data::{DashboardData, LogQuery, Page, SortKey, ViewSettings};
use crate::error::CoreError;
use crate::source::DataSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Stat cards and the endpoint table.
    Dashboard,
    /// Filterable, sortable, paginated check log.
    Logs,
    /// Recent alerts with incident count.
    Alerts,
}

impl View {
    pub const ALL: [View; 3] = [View::Dashboard, View::Logs, View::Alerts];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Dashboard => View::Logs,
            View::Logs => View::Alerts,
            View::Alerts => View::Dashboard,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Dashboard => View::Alerts,
            View::Logs => View::Dashboard,
            View::Alerts => View::Logs,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Logs => "Logs",
            View::Alerts => "Alerts",
        }
    }
}

/// Handle to a background activity that must hold still while the user
/// interacts with an overlay.
pub trait Suspend: Debug {
    fn pause(&mut self);
    fn resume(&mut self);
}

/// Interval-driven reload timer shared between the event loop and the app.
///
/// Clones share the paused flag, so the loop sees a pause issued through the
/// copy handed to [`App`].
#[derive(Debug, Clone)]
pub struct AutoRefresh {
    interval: Duration,
    paused: Arc<AtomicBool>,
}

impl AutoRefresh {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            paused: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Whether a reload is due given the time of the previous one.
    pub fn due(&self, last: Instant) -> bool {
        !self.is_paused() && last.elapsed() >= self.interval
    }
}

impl Suspend for AutoRefresh {
    fn pause(&mut self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    fn resume(&mut self) {
        self.paused.store(false, Ordering::Relaxed);
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<DashboardData>,
    pub load_error: Option<String>,
    pub settings: ViewSettings,

    // Navigation state
    pub selected_endpoint_index: usize,
    pub selected_log_index: usize,
    pub selected_alert_index: usize,

    // Log view
    pub log_query: LogQuery,
    pub show_picker: bool,
    pub picker_cursor: usize,
    refresh: Box<dyn Suspend>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`.
    ///
    /// `refresh` is paused while the endpoint picker is open.
    pub fn new(
        source: Box<dyn DataSource>,
        settings: ViewSettings,
        refresh: Box<dyn Suspend>,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Dashboard,
            show_help: false,
            source,
            data: None,
            load_error: None,
            log_query: LogQuery::new(settings.page_size),
            settings,
            selected_endpoint_index: 0,
            selected_log_index: 0,
            selected_alert_index: 0,
            show_picker: false,
            picker_cursor: 0,
            refresh,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source and recompute every view as of `now`.
    ///
    /// Without a new snapshot the current one is recomputed so relative
    /// times and the uptime window keep moving. Returns `Ok(true)` if new
    /// data was received.
    pub fn reload_data(&mut self, now: DateTime<Utc>) -> Result<bool> {
        let polled = self.source.poll();
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }

        let Some(snapshot) = polled else {
            if let Some(ref current) = self.data {
                let mut refreshed =
                    DashboardData::from_snapshot(current.snapshot.clone(), &self.settings, now)?;
                refreshed.rejected = current.rejected;
                self.data = Some(refreshed);
            }
            return Ok(false);
        };

        let mut data = DashboardData::from_snapshot(snapshot, &self.settings, now)?;
        data.rejected = self.source.rejected();
        info!(
            endpoints = data.endpoints.len(),
            logs = data.snapshot.logs.len(),
            alerts = data.alerts.incident_count,
            rejected = data.rejected,
            "Loaded snapshot"
        );
        if data.stats_mismatch() {
            debug!("Backend stats disagree with the endpoint list");
        }

        self.data = Some(data);
        self.load_error = None;
        self.clamp_selection();
        Ok(true)
    }

    /// Re-read the source even if it reports no change.
    pub fn force_reload(&mut self, now: DateTime<Utc>) -> Result<bool> {
        self.source.invalidate();
        self.reload_data(now)
    }

    fn clamp_selection(&mut self) {
        let Some(ref data) = self.data else {
            return;
        };
        self.selected_endpoint_index = self
            .selected_endpoint_index
            .min(data.endpoints.len().saturating_sub(1));
        self.selected_alert_index = self
            .selected_alert_index
            .min(data.alerts.alerts.len().saturating_sub(1));
        self.picker_cursor = self.picker_cursor.min(data.targets.len().saturating_sub(1));

        let page_shape = match self.log_page() {
            Ok(Some(page)) => Some((page.page_count, page.rows.len())),
            _ => None,
        };
        if let Some((page_count, rows)) = page_shape {
            self.log_query.clamp_page(page_count);
            self.selected_log_index = self.selected_log_index.min(rows.saturating_sub(1));
        }
    }

    /// The log page the Logs view shows, `None` before the first snapshot.
    pub fn log_page(&self) -> Result<Option<Page<'_>>, CoreError> {
        let Some(ref data) = self.data else {
            return Ok(None);
        };
        let known = data.known_endpoints();
        self.log_query.run(&data.snapshot.logs, &known).map(Some)
    }

    /// Switch to the next view (cycles through Dashboard → Logs → Alerts).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        if self.show_picker {
            let count = self.data.as_ref().map_or(0, |d| d.targets.len());
            self.picker_cursor = (self.picker_cursor + n).min(count.saturating_sub(1));
            return;
        }
        let max = self.item_count().saturating_sub(1);
        let index = self.selected_index_mut();
        *index = (*index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        if self.show_picker {
            self.picker_cursor = self.picker_cursor.saturating_sub(n);
            return;
        }
        let index = self.selected_index_mut();
        *index = index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        *self.selected_index_mut() = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        let last = self.item_count().saturating_sub(1);
        *self.selected_index_mut() = last;
    }

    fn selected_index_mut(&mut self) -> &mut usize {
        match self.current_view {
            View::Dashboard => &mut self.selected_endpoint_index,
            View::Logs => &mut self.selected_log_index,
            View::Alerts => &mut self.selected_alert_index,
        }
    }

    /// Rows in the current view's list.
    fn item_count(&self) -> usize {
        let Some(ref data) = self.data else {
            return 0;
        };
        match self.current_view {
            View::Dashboard => data.endpoints.len(),
            View::Logs => self.log_page().ok().flatten().map_or(0, |p| p.rows.len()),
            View::Alerts => data.alerts.alerts.len(),
        }
    }

    pub fn next_page(&mut self) {
        let page_count = match self.log_page() {
            Ok(Some(page)) => page.page_count,
            _ => return,
        };
        self.log_query.next_page(page_count);
        self.selected_log_index = 0;
    }

    pub fn prev_page(&mut self) {
        self.log_query.prev_page();
        self.selected_log_index = 0;
    }

    /// Cycle the log sort column.
    pub fn cycle_sort(&mut self) {
        self.log_query.cycle_sort_key();
        self.selected_log_index = 0;
    }

    /// Toggle the log sort direction.
    pub fn toggle_sort_direction(&mut self) {
        self.log_query.toggle_sort_direction();
        self.selected_log_index = 0;
    }

    /// Sort by a column as a header click would.
    pub fn click_sort(&mut self, key: SortKey) {
        self.log_query.click_sort(key);
        self.selected_log_index = 0;
    }

    pub fn cycle_status_filter(&mut self) {
        self.log_query.cycle_status();
        self.selected_log_index = 0;
    }

    /// Open the endpoint picker and pause auto-refresh until it closes.
    pub fn open_picker(&mut self) {
        if self.show_picker {
            return;
        }
        self.show_picker = true;
        self.picker_cursor = 0;
        self.refresh.pause();
        debug!("Endpoint picker opened, auto-refresh paused");
    }

    pub fn close_picker(&mut self) {
        if !self.show_picker {
            return;
        }
        self.show_picker = false;
        self.refresh.resume();
        debug!("Endpoint picker closed, auto-refresh resumed");
    }

    /// Endpoint under the picker cursor.
    pub fn picker_endpoint(&self) -> Option<EndpointId> {
        self.data
            .as_ref()?
            .targets
            .keys()
            .nth(self.picker_cursor)
            .copied()
    }

    pub fn toggle_picker_endpoint(&mut self) {
        if let Some(id) = self.picker_endpoint() {
            self.log_query.toggle_endpoint(id);
            self.selected_log_index = 0;
        }
    }

    pub fn toggle_all_endpoints(&mut self) {
        if let Some(ref data) = self.data {
            let known = data.known_endpoints();
            self.log_query.toggle_all(&known);
            self.selected_log_index = 0;
        }
    }

    /// Navigate back: close overlays first, then return to the Dashboard.
    pub fn go_back(&mut self) {
        if self.show_picker {
            self.close_picker();
        } else if self.current_view != View::Dashboard {
            self.current_view = View::Dashboard;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.close_picker();
        self.running = false;
    }

    /// Export the derived views to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref data) = self.data else {
            bail!("No data to export");
        };
        std::fs::write(path, data.to_export_json()?)?;
        info!("Exported dashboard state to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{check, endpoint};
    use crate::data::StatusFilter;
    use crate::source::ChannelSource;
    use chrono::TimeZone;
    use pingwatch_types::Snapshot;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<&'static str>>>);

    impl Suspend for Recorder {
        fn pause(&mut self) {
            self.0.borrow_mut().push("pause");
        }
        fn resume(&mut self) {
            self.0.borrow_mut().push("resume");
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn snapshot() -> Snapshot {
        let at = now() - chrono::Duration::minutes(5);
        Snapshot {
            endpoints: vec![endpoint(1, false), endpoint(2, true)],
            logs: (0..25)
                .map(|i| check(i, 1 + i % 2, Some(if i % 5 == 0 { 500 } else { 200 }), 50, at))
                .collect(),
            ..Snapshot::default()
        }
    }

    fn app_with(recorder: Recorder) -> App {
        let (tx, source) = ChannelSource::create("test");
        tx.send(snapshot()).unwrap();
        let settings = ViewSettings {
            page_size: 10,
            ..ViewSettings::default()
        };
        let mut app = App::new(Box::new(source), settings, Box::new(recorder));
        app.reload_data(now()).unwrap();
        app
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Dashboard.next(), View::Logs);
        assert_eq!(View::Alerts.next(), View::Dashboard);
        assert_eq!(View::Dashboard.prev(), View::Alerts);
        assert_eq!(View::ALL.len(), 3);
    }

    #[test]
    fn test_reload_populates_data() {
        let app = app_with(Recorder::default());
        let data = app.data.as_ref().unwrap();
        assert_eq!(data.stats.total, 2);
        assert_eq!(data.stats.down, 1);
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_reload_without_change_recomputes() {
        let mut app = app_with(Recorder::default());
        let later = now() + chrono::Duration::hours(30);
        assert!(!app.reload_data(later).unwrap());
        let data = app.data.as_ref().unwrap();
        assert_eq!(data.computed_at, later);
        assert_eq!(data.stats.average_uptime, None, "checks aged out of the window");
    }

    #[test]
    fn test_log_paging() {
        let mut app = app_with(Recorder::default());
        app.set_view(View::Logs);

        let page = app.log_page().unwrap().unwrap();
        assert_eq!(page.total_count, 25);
        assert_eq!(page.page_count, 3);

        app.next_page();
        app.next_page();
        app.next_page();
        let page = app.log_page().unwrap().unwrap();
        assert_eq!(page.page_index, 2);
        assert_eq!(page.rows.len(), 5);

        app.select_last();
        assert_eq!(app.selected_log_index, 4);

        app.prev_page();
        assert_eq!(app.log_query.page_index, 1);
        assert_eq!(app.selected_log_index, 0);
    }

    #[test]
    fn test_status_filter_resets_page() {
        let mut app = app_with(Recorder::default());
        app.next_page();
        app.cycle_status_filter();
        assert_eq!(app.log_query.status, StatusFilter::Success);
        assert_eq!(app.log_query.page_index, 0);
        assert_eq!(app.log_page().unwrap().unwrap().total_count, 20);
    }

    #[test]
    fn test_picker_pauses_refresh() {
        let recorder = Recorder::default();
        let mut app = app_with(recorder.clone());

        app.open_picker();
        app.open_picker();
        assert!(app.show_picker);

        app.select_next();
        assert_eq!(app.picker_endpoint(), Some(EndpointId(2)));
        app.toggle_picker_endpoint();
        assert_eq!(app.log_page().unwrap().unwrap().total_count, 12);

        app.go_back();
        assert!(!app.show_picker);
        assert_eq!(*recorder.0.borrow(), vec!["pause", "resume"]);
    }

    #[test]
    fn test_deselect_all_shows_everything() {
        let mut app = app_with(Recorder::default());
        app.toggle_all_endpoints();
        assert_eq!(app.log_query.selection_label(), "2 Selected");
        app.toggle_all_endpoints();
        assert_eq!(app.log_query.selection_label(), "All Endpoints");
        assert_eq!(app.log_page().unwrap().unwrap().total_count, 25);
    }

    #[test]
    fn test_auto_refresh_shares_pause_flag() {
        let timer = AutoRefresh::new(Duration::ZERO);
        let mut handle = timer.clone();
        assert!(timer.due(Instant::now()));

        handle.pause();
        assert!(timer.is_paused());
        assert!(!timer.due(Instant::now()));

        handle.resume();
        assert!(timer.due(Instant::now()));
    }

    #[test]
    fn test_export_state() {
        let app = app_with(Recorder::default());
        let file = tempfile::NamedTempFile::new().unwrap();
        app.export_state(file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["stats"]["total"], 2);
    }

    #[test]
    fn test_export_without_data_fails() {
        let (_tx, source) = ChannelSource::create("test");
        let app = App::new(
            Box::new(source),
            ViewSettings::default(),
            Box::new(Recorder::default()),
        );
        assert!(app.export_state(Path::new("unused.json")).is_err());
    }
}
