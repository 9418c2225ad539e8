use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod app;
mod config;
mod db;
mod grid;
mod models;
mod ui;
mod utils;

use api::ComputeClient;
use app::state::{AppMessage, AppState};
use config::settings::Settings;
use db::RowStore;
use ui::app::TuiApp;

#[derive(Parser, Debug)]
#[command(name = "rosteriq-tui")]
#[command(about = "Terminal UI for RosterIQ transfer-portal recruiting")]
#[command(version)]
struct Args {
    /// Database path (use :memory: for in-memory)
    #[arg(short, long)]
    database: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Base URL of the compute service
    #[arg(long)]
    api_url: Option<String>,

    /// Load players from a JSON file into the database before starting
    #[arg(long)]
    import: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,
}

/// Logs go to a file; stdout belongs to the terminal UI
fn init_logging(settings: &Settings) -> Result<()> {
    let path = PathBuf::from(&settings.log_file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(())
}

/// Put the terminal back before the panic message is printed
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        default_hook(info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load settings, then apply command-line overrides
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(database) = args.database {
        settings.database_path = database;
    }
    if let Some(url) = args.api_url {
        settings.api_base_url = url;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    init_logging(&settings)?;
    install_panic_hook();
    tracing::info!("Starting rosteriq-tui against {}", settings.api_base_url);

    let store = RowStore::open(&settings.database_path)
        .with_context(|| format!("opening database {}", settings.database_path))?;
    if let Some(path) = &args.import {
        let count = store
            .import_json(path)
            .with_context(|| format!("importing {}", path.display()))?;
        tracing::info!("Imported {} players", count);
    }
    match store.player_count() {
        Ok(count) => tracing::info!("Row store holds {} players", count),
        Err(e) => tracing::warn!("Could not count stored players: {}", e),
    }

    let client = ComputeClient::new(&settings.api_base_url, settings.request_timeout())?;

    // Create channels for communication
    let (state_tx, state_rx) = mpsc::channel(1000);
    let (ui_update_tx, _) = broadcast::channel(100);

    let state = Arc::new(AppState::new(
        store,
        client,
        ui_update_tx.clone(),
        settings.assistant_delay(),
    ));

    // Start state manager
    let manager_state = state.clone();
    let manager_tx = state_tx.clone();
    let state_manager_handle = tokio::spawn(async move {
        app::state::run_state_manager(manager_state, state_rx, manager_tx, ui_update_tx).await;
    });

    if state_tx.send(AppMessage::LoadPlayers).await.is_err() {
        tracing::error!("State manager stopped before the initial load");
    }

    // Run TUI (blocks until user quits)
    let result = match TuiApp::new(state, state_tx, &settings) {
        Ok(mut tui) => tui.run().await,
        Err(e) => Err(e),
    };

    state_manager_handle.abort();
    tracing::info!("Shutting down");

    result
}
