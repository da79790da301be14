mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use wattview_api::ApiClient;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = build_client(&cli.global)?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &client, &cli.global).await
}

/// Build an `ApiClient` from the config file plus CLI flag overrides.
fn build_client(global: &cli::GlobalOpts) -> Result<ApiClient, CliError> {
    let mut config = wattview_config::load_config_or_default();
    if let Some(ref endpoint) = global.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(timeout) = global.timeout {
        config.timeout_secs = timeout;
    }

    let endpoint = config.endpoint_url()?;
    ApiClient::new(endpoint, &config.transport())
        .map_err(|e| CliError::Core(wattview_core::CoreError::from(e)))
}
