//! FTPM-Admin: terminal admin panel for a vsftpd server.
//!
//! ## Usage
//!
//! ```bash
//! # Connect to the default backend (http://backend:8000)
//! ftpm-admin
//!
//! # Connect elsewhere, poll the dashboard every 10 seconds
//! ftpm-admin --endpoint http://127.0.0.1:8000 --stats-interval 10
//!
//! # Sample data, no backend needed
//! ftpm-admin --demo
//! ```

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info};

use ftpm_admin::domain::{App, AppEvent, Command, Key, Page};
use ftpm_admin::runtime::Runtime;
use ftpm_admin::{demo, ui};
use ftpm_client::telemetry::init_file_logging;
use ftpm_client::{ApiClient, ClientConfig};

/// FTPM-Admin: vsftpd admin panel
#[derive(Parser, Debug)]
#[command(name = "ftpm-admin")]
#[command(author, version, about = "TUI admin panel for a vsftpd server managed by FTP Manager")]
struct Args {
    /// FTP Manager API origin (overrides FTPM_API_URL)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Dashboard statistics refresh interval in seconds
    #[arg(long)]
    stats_interval: Option<u64>,

    /// Recent users refresh interval in seconds
    #[arg(long)]
    users_interval: Option<u64>,

    /// vsftpd log refresh interval in seconds
    #[arg(long)]
    log_interval: Option<u64>,

    /// Retries per failed dashboard fetch
    #[arg(long)]
    retries: Option<u32>,

    /// File receiving the panel's own logs
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run in demo mode with fake data (no API connection required)
    #[arg(long)]
    demo: bool,
}

impl Args {
    /// Environment first, then flags on top.
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(endpoint) = &self.endpoint {
            config.base_url = endpoint.clone();
        }
        if let Some(secs) = self.stats_interval {
            config.stats_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.users_interval {
            config.recent_users_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.log_interval {
            config.log_interval = Duration::from_secs(secs);
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
        if let Some(path) = &self.log_file {
            config.log_file = path.clone();
        }
        config
    }
}

/// Where commands go: the live backend or the demo responder.
enum Backend {
    Live(Runtime),
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.client_config();
    config.validate().context("invalid configuration")?;

    init_file_logging(&config.log_level, &config.log_file)?;
    info!(endpoint = %config.base_url, demo = args.demo, "Starting ftpm-admin");

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut app = App::new();
    let mut backend = if args.demo {
        demo::set_demo_data(&mut app);
        Backend::Demo
    } else {
        let client = Arc::new(ApiClient::from_config(&config)?);
        let runtime = Runtime::new(client, &config, events_tx);
        runtime.probe_service();
        Backend::Live(runtime)
    };

    // Setup terminal with panic hook for cleanup
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    dispatch(&mut app, &mut backend, Command::EnterPage(Page::Dashboard));

    // Main loop
    let result = run_app(&mut terminal, &mut app, &mut backend, &mut events_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "ftpm-admin exited with an error");
    }
    info!("ftpm-admin stopped");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    backend: &mut Backend,
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle input with timeout so background results are picked up
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = map_key(key.code).and_then(|k| app.handle_key(k)) {
                        dispatch(app, backend, command);
                    }
                }
            }
        }

        while let Ok(event) = events.try_recv() {
            if let Some(command) = app.apply(event) {
                dispatch(app, backend, command);
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => return None,
    })
}

fn dispatch(app: &mut App, backend: &mut Backend, command: Command) {
    match backend {
        Backend::Live(runtime) => runtime.execute(command),
        Backend::Demo => {
            // Demo answers arrive synchronously and may trigger follow-ups.
            let mut pending = VecDeque::from([command]);
            while let Some(command) = pending.pop_front() {
                for event in demo::respond(&command) {
                    pending.extend(app.apply(event));
                }
            }
        }
    }
}
