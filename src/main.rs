use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use eduplanner::app::App;
use eduplanner::catalog::{Catalog, loader};
use eduplanner::config::{Config, MIN_QUESTION_SECS};
use eduplanner::event::{AppEvent, EventHandler};
use eduplanner::{input, logging, ui};

#[derive(Parser)]
#[command(name = "eduplanner", version, about = "Terminal learning planner with courses, assessments and lesson plans")]
struct Cli {
    #[arg(short, long, help = "Theme name (dark, light)")]
    theme: Option<String>,

    #[arg(short, long, help = "Course catalog file (.toml or .json)")]
    catalog: Option<PathBuf>,

    #[arg(short = 's', long, help = "Seconds allowed per assessment question")]
    question_seconds: Option<u32>,

    #[arg(long, help = "Count correct answers in the assessment")]
    scored: bool,

    #[arg(long, help = "Log file path")]
    log_file: Option<PathBuf>,
}

fn load_catalog(path: Option<PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => loader::load_file(&path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => loader::load_embedded().context("bundled catalog is invalid"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "eduplanner starting");

    let config_path = Config::config_path();
    let mut config = Config::load_from(&config_path).unwrap_or_else(|err| {
        tracing::warn!(%err, "config unreadable, using defaults");
        Config::default()
    });

    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(secs) = cli.question_seconds {
        config.question_seconds = secs.max(MIN_QUESTION_SECS);
    }
    if cli.scored {
        config.score_assessment = true;
    }

    let catalog_path = cli.catalog.or_else(|| config.catalog_path.clone().map(PathBuf::from));
    let catalog = load_catalog(catalog_path)?;

    let mut app = App::new(Arc::new(catalog), config, Some(config_path));

    install_panic_hook();
    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            restore_terminal();
            return Err(err);
        }
    };

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    restore_terminal();
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(err = ?err, "event loop failed");
    }
    tracing::info!("eduplanner exiting");
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Safe to call on a partially set up terminal.
fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(%err, "failed to leave raw mode");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
        tracing::warn!(%err, "failed to leave alternate screen");
    }
}

/// Put the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => input::handle_key(app, key),
            AppEvent::Mouse(mouse) => {
                let size = terminal.size()?;
                input::handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
            }
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }
        // Busy input can starve ticks; the quiz clock reads wall time anyway.
        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}
