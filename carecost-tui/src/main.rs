//! CareCost TUI - four-section terminal interface for the symptom-to-cost lookup.
//!
//! Sections:
//! 1. Symptom - free-text symptom, Enter searches ICD-10 codes
//! 2. Diagnosis - pick one of the candidate codes
//! 3. ZIP Code - five digits, checked in the background as you type
//! 4. Results - cost ranges by category and the overall summary

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use carecost_core::api::{CareCostApi, HttpBackend};
use carecost_core::config::ClientConfig;
use carecost_tui::app::AppState;
use carecost_tui::worker::{self, WorkerCommand};
use carecost_tui::{input, persistence, ui};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    dotenvy::dotenv().ok();

    // Paths
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("carecost");
    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("carecost")
        .join("state.json");

    init_logging(&data_dir)?;

    let config = ClientConfig::resolve(None, |key| std::env::var(key).ok())
        .context("invalid CareCost configuration")?;
    info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "starting tui");
    let api: Arc<dyn CareCostApi> = Arc::new(HttpBackend::new(&config)?);

    // Load persisted state
    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(api.clone(), cmd_rx, resp_tx)
        .context("failed to spawn worker thread")?;

    let mut app = AppState::new(api, cmd_tx.clone(), resp_rx);
    persistence::apply(&mut app, &persisted);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let to_save = persistence::extract(&app, persisted.welcome_dismissed);
    let _ = persistence::save(&state_path, &to_save);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(data_dir: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join("carecost-tui.log");
    let file = File::create(&log_path)
        .with_context(|| format!("cannot create log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("carecost=info".parse()?))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        app.tick(Instant::now());

        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. A queued request runs now that its busy frame is on screen.
        if app.pending.is_some() {
            app.run_pending();
            continue;
        }

        // 3. Drain worker responses (non-blocking)
        app.drain_worker();

        // 4. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
