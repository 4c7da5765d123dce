use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

use gatewatch::data::duration::parse_duration;
use gatewatch::data::ScoreThresholds;
use gatewatch::source::{DataSource, DemoSource, FileSource, StreamSource};
use gatewatch::state::SharedState;
use gatewatch::ui::{self, Theme};
use gatewatch::{events, App, Settings};

#[derive(Parser, Debug)]
#[command(name = "gatewatch")]
#[command(about = "Diagnostic TUI for watching gateway health-score trends")]
struct Args {
    /// Path to a JSON file holding the health history
    #[arg(short, long, default_value = "health.json", conflicts_with_all = ["connect", "demo"])]
    file: PathBuf,

    /// Connect to a TCP endpoint streaming samples as JSON lines (host:port)
    #[arg(short, long, conflicts_with_all = ["file", "demo"])]
    connect: Option<String>,

    /// Render a synthetic fluctuating history (no gateway needed)
    #[arg(long, conflicts_with_all = ["file", "connect"])]
    demo: bool,

    /// Poll cadence for the data source (e.g. "1s", "500ms")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Samples kept in the sliding history window
    #[arg(long)]
    retention: Option<usize>,

    /// Path to a settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force "dark" or "light" instead of detecting the terminal
    #[arg(long)]
    theme: Option<String>,

    /// Export the current history to a JSON file and exit
    #[arg(short, long, conflicts_with_all = ["connect", "demo"])]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Settings file and environment first, CLI flags on top
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(refresh) = args.refresh {
        settings.refresh = refresh;
    }
    if let Some(retention) = args.retention {
        settings.retention = retention;
    }
    if let Some(theme) = args.theme {
        settings.theme = Some(theme);
    }

    let refresh = parse_duration(&settings.refresh).unwrap_or(Duration::from_secs(1));
    let thresholds = settings.thresholds();
    let theme = Theme::from_name(settings.theme.as_deref());
    let state = SharedState::new(settings.retention);

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&args.file, &export_path, state, thresholds, theme);
    }

    // TCP stream mode
    if let Some(ref addr) = args.connect {
        return run_with_tcp(addr, state, thresholds, theme);
    }

    // Demo mode
    if args.demo {
        let source = Box::new(DemoSource::new(settings.retention));
        return run_tui(source, state, thresholds, theme, refresh);
    }

    // Default: file-based mode
    let source = Box::new(FileSource::new(&args.file));
    run_tui(source, state, thresholds, theme, refresh)
}

/// Run with a TCP stream data source
fn run_with_tcp(
    addr: &str,
    state: SharedState,
    thresholds: ScoreThresholds,
    theme: Theme,
) -> Result<()> {
    // The runtime must outlive the TUI: it drives the stream reader task
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                println!("Connected!");
                Ok(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn DataSource>)
            }
            Err(e) => Err(anyhow::anyhow!("Failed to connect to {}: {}", addr, e)),
        }
    })?;

    // Streams push continuously, so poll at a short fixed cadence
    run_tui(source, state, thresholds, theme, Duration::from_millis(100))
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    state: SharedState,
    thresholds: ScoreThresholds,
    theme: Theme,
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
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, state, thresholds, theme);
    let _ = app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

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
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for a readable chart
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 10;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let y = (area.height / 2).saturating_sub(2);
                let centered = ratatui::layout::Rect::new(0, y, area.width, 5u16.min(area.height));
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(8),    // Trend chart
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::trend::render(frame, app, chunks[1]);
            ui::common::render_status_bar(frame, app, chunks[2]);

            // Tooltip for the hovered sample
            ui::inspect::render_overlay(frame, app, area);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh data periodically
        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Export the current health history to a JSON file
fn export_to_file(
    history_path: &std::path::Path,
    export_path: &std::path::Path,
    state: SharedState,
    thresholds: ScoreThresholds,
    theme: Theme,
) -> Result<()> {
    let source = Box::new(FileSource::new(history_path));
    let mut app = App::new(source, state, thresholds, theme);
    app.reload_data()?;

    if let Some(ref err) = app.load_error {
        anyhow::bail!("Failed to read {}: {}", history_path.display(), err);
    }

    app.export_state(export_path)?;
    println!("Exported health history to: {}", export_path.display());
    Ok(())
}
