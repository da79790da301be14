//! `wattview-tui` — Terminal dashboard for server/VM energy consumption.
//!
//! Built on [ratatui](https://ratatui.rs). One screen, four panels:
//! stage servers, commit to load their VMs, pick a local date range,
//! submit, and read the aggregate consumption.
//!
//! Logs are written to a file (default `/tmp/wattview-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! app launch.

mod action;
mod app;
mod event;
mod fetch;
mod panel;
mod panels;
mod state;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use wattview_api::ApiClient;

use crate::app::App;

/// Terminal dashboard for querying server and VM energy consumption.
#[derive(Parser, Debug)]
#[command(name = "wattview-tui", version, about)]
struct Cli {
    /// Backend base URL (e.g., http://127.0.0.1:5000)
    #[arg(short = 'e', long, env = "WATTVIEW_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "WATTVIEW_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Log file path (defaults to /tmp/wattview-tui.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(log_file: &std::path::Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wattview_tui={log_level},wattview_core={log_level},wattview_api={log_level}")));

    let log_dir = log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("wattview-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Config file + env, then CLI flag overrides
    let mut config = wattview_config::load_config_or_default();
    if let Some(endpoint) = cli.endpoint.clone() {
        config.endpoint = endpoint;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(log_file) = cli.log_file.clone() {
        config.log_file = log_file;
    }

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&config.log_file, cli.verbose);

    let endpoint = config
        .endpoint_url()
        .map_err(|e| eyre!("invalid endpoint: {e}"))?;

    info!(endpoint = %endpoint, "starting wattview-tui");

    let client = ApiClient::new(endpoint, &config.transport())
        .map_err(|e| eyre!("failed to build HTTP client: {e}"))?;

    let mut app = App::new(client);
    app.run().await?;

    Ok(())
}
