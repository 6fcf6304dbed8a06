use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use pingwatch::{
    events, logging, ui, App, AutoRefresh, DashboardData, DataSource, FileSource, Overrides,
    Settings, ViewSettings,
};

#[derive(Parser, Debug)]
#[command(name = "pingwatch")]
#[command(about = "Terminal dashboard for endpoint uptime, ping logs and alerts")]
struct Args {
    /// Path to the snapshot JSON file
    #[arg(short, long, default_value = "snapshot.json")]
    file: PathBuf,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Trailing uptime window in hours
    #[arg(long, allow_negative_numbers = true)]
    window_hours: Option<i64>,

    /// Log rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Write diagnostic logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export derived views to JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        logging::init(path)?;
    }

    let settings = Settings::load(
        args.config.as_deref(),
        &Overrides {
            refresh_secs: args.refresh,
            window_hours: args.window_hours,
            page_size: args.page_size,
        },
    )?;
    let view_settings = settings.view_settings()?;
    info!(?settings, "Settings loaded");

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&args.file, &export_path, &view_settings);
    }

    let source = Box::new(FileSource::new(&args.file));
    run_tui(source, view_settings, settings.refresh_interval())
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    settings: ViewSettings,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let refresh = AutoRefresh::new(refresh_interval);
    let mut app = App::new(source, settings, Box::new(refresh.clone()));
    if let Err(e) = app.reload_data(Utc::now()) {
        warn!("Initial load failed: {}", e);
    }

    let result = run_app(&mut terminal, &mut app, &refresh);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh: &AutoRefresh,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    events::handle_mouse_event(app, mouse, ui::CONTENT_START_ROW);
                }
                // Terminal will redraw on next iteration
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        // Paused while the endpoint picker is open
        if refresh.due(last_refresh) {
            if let Err(e) = app.reload_data(Utc::now()) {
                warn!("Refresh failed: {}", e);
                app.set_status_message(format!("Refresh failed: {}", e));
            }
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Export derived views of a snapshot file to JSON
fn export_to_file(snapshot_path: &Path, export_path: &Path, settings: &ViewSettings) -> Result<()> {
    let data = DashboardData::load(snapshot_path, settings, Utc::now())?;
    std::fs::write(export_path, data.to_export_json()?)?;

    println!("Exported to {}", export_path.display());
    println!(
        "  {} endpoints ({} up, {} down), average uptime {}",
        data.stats.total,
        data.stats.up,
        data.stats.down,
        data.stats.display_average()
    );
    println!("  {}", data.alerts.incident_label());
    if data.rejected > 0 {
        println!("  {} malformed records skipped", data.rejected);
    }

    Ok(())
}
