use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use sentinel_console::api::QueryClient;
use sentinel_console::app::{App, View};
use sentinel_console::poll::{Fetcher, SignalMonitor};
use sentinel_console::{events, ui};

#[derive(Parser, Debug)]
#[command(name = "sentinel-console")]
#[command(about = "Operator TUI for browsing production incidents and AI root-cause analyses")]
struct Args {
    /// Base URL of the sentinel query API
    #[arg(long, env = "SENTINEL_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Dashboard refresh interval in seconds
    #[arg(short, long, default_value = "30")]
    refresh: u64,

    /// Signal freshness poll interval in seconds
    #[arg(long, default_value = "10")]
    signal_poll: u64,

    /// Incidents per page
    #[arg(long, default_value = "50")]
    page_size: u64,

    /// Seconds without a signal before the feed reads as standby
    #[arg(long, default_value = "60")]
    stale_after: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr and only show up when RUST_LOG is set, so they do
    // not fight the alternate screen during normal operation
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let client = QueryClient::builder()
        .base_url(&args.api_url)
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    // The TUI loop is synchronous; fetch tasks run on this runtime in the
    // background. The enter guard keeps tokio::spawn usable from the loop.
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let fetcher = Fetcher::new(client.clone());
    let monitor = SignalMonitor::spawn(client, Duration::from_secs(args.signal_poll));

    let stale_after = chrono::Duration::seconds(args.stale_after as i64);
    let mut app = App::new(fetcher, monitor, args.page_size, stale_after);

    run_tui(&mut app, Duration::from_secs(args.refresh))
}

/// Run the TUI with the given app state.
fn run_tui(app: &mut App, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Kick off the initial queries
    app.refresh();

    let result = run_app(&mut terminal, app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Apply completed fetches and the latest freshness sample
        app.pump();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, area.height.saturating_sub(4) / 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                View::Incidents => ui::incidents::render(frame, app, chunks[2]),
                View::Analysis => ui::analysis::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh data periodically
        if last_refresh.elapsed() >= refresh_interval {
            app.refresh();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
