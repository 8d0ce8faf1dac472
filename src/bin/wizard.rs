use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use helpq::api::{DemoBackend, HttpBackend, QueueBackend};
use helpq::app::{App, AppAction};
use helpq::config::WizardConfig;
use helpq::error::{HelpqError, Result};
use helpq::event::{Event, EventHandler};
use helpq::events::TracingSink;
use ratatui::prelude::*;
use std::io::stdout;
use std::panic;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "helpq-wizard")]
#[command(author, version, about = "Create an office-hours help queue")]
struct Args {
    /// Path to config file (default: <config dir>/helpq/wizard.toml)
    #[arg(long)]
    config: Option<String>,

    /// Queue server base URL (overrides the config file)
    #[arg(long)]
    server: Option<String>,

    /// Run against an in-memory backend instead of a live server
    #[arg(long)]
    dryrun: bool,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging only if log file is specified
    if let Some(ref log_path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting helpq-wizard");
        }
    }

    // Load config from specified path, default path, or use defaults
    let mut config = match args.config.as_deref() {
        Some(path) => WizardConfig::load_from(path)?,
        None => WizardConfig::load()?,
    };

    // Flags override the config file
    if args.dryrun {
        config.general.dryrun = true;
    }
    if let Some(server) = args.server {
        config.server.base_url = server;
    }

    let outcome = if config.general.dryrun {
        let backend = DemoBackend::new().with_latency(Duration::from_millis(400));
        run_wizard(config, backend, true).await
    } else {
        let backend = HttpBackend::new(&config.server.base_url);
        run_wizard(config, backend, false).await
    };

    match outcome {
        Ok(Some(manage_url)) => {
            println!("Queue created. Manage it at {manage_url}");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            error!("Wizard error: {}", e);
            Err(e)
        }
    }
}

/// Runs the wizard end to end. Returns the manage URL of the created queue,
/// or None if the user cancelled.
async fn run_wizard<B: QueueBackend>(
    config: WizardConfig,
    backend: B,
    demo_mode: bool,
) -> Result<Option<String>> {
    // No authenticated user means a login redirect, not a wizard
    let current_user = match backend.current_user().await? {
        Some(user) => user,
        None => {
            return Err(HelpqError::LoginRequired(config.server.login_url.clone()));
        }
    };
    info!("Signed in as {}", current_user.uniqname);

    // Set up panic handler to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let manage_url = config.server.manage_url.trim_end_matches('/').to_string();
    let mut app = App::new(config, current_user, demo_mode);

    let result = run(&mut terminal, &mut app, &backend).await;

    restore_terminal()?;
    result?;

    Ok(app
        .wizard
        .created()
        .map(|queue| format!("{manage_url}/{}/", queue.id)))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| HelpqError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| HelpqError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| HelpqError::Terminal(e.to_string()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| HelpqError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen).map_err(|e| HelpqError::Terminal(e.to_string()))?;
    Ok(())
}

async fn run<B: QueueBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    backend: &B,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut events = EventHandler::new(tick_rate);
    let sink = TracingSink;

    loop {
        // Draw UI
        terminal
            .draw(|frame| helpq::app::ui::draw(frame, app))
            .map_err(|e| HelpqError::Terminal(e.to_string()))?;

        // Handle events
        match events.next().await {
            Event::Key(key) => {
                if let Some(action) = app.handle_key(key) {
                    match action {
                        AppAction::AddHost(uniqname) => {
                            app.add_host(backend, &uniqname).await;
                        }
                        AppAction::Submit => {
                            app.submit(backend, &sink).await?;
                        }
                    }
                }
            }
            Event::Resize => {}
            Event::Tick => {
                app.tick();
            }
        }

        if app.should_exit {
            break;
        }
    }

    Ok(())
}
