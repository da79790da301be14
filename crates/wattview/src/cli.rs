//! Clap derive structures for the `wattview` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wattview -- query server and VM energy consumption from the command line
#[derive(Debug, Parser)]
#[command(
    name = "wattview",
    version,
    about = "Query server and VM energy consumption",
    long_about = "One-shot client for the wattview energy backend.\n\n\
        Lists servers, fetches VM inventories for a server set, and\n\
        computes aggregate energy consumption over a date range.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides the config file)
    #[arg(long, short = 'e', env = "WATTVIEW_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WATTVIEW_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Request timeout in seconds
    #[arg(long, env = "WATTVIEW_TIMEOUT_SECS", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List servers known to the backend
    #[command(alias = "srv")]
    Servers,

    /// Fetch VM inventories for a server set
    Vms(VmsArgs),

    /// Compute energy consumption for selected VMs over a date range
    #[command(alias = "en")]
    Energy(EnergyArgs),
}

#[derive(Debug, Args)]
pub struct VmsArgs {
    /// Server id to include (repeatable)
    #[arg(long = "server", short = 's', value_name = "ID", required = true)]
    pub servers: Vec<u64>,
}

#[derive(Debug, Args)]
pub struct EnergyArgs {
    /// Server id to include (repeatable)
    #[arg(long = "server", short = 's', value_name = "ID", required = true)]
    pub servers: Vec<u64>,

    /// VM ip to select (repeatable; all VMs of the servers if omitted)
    #[arg(long = "vm", value_name = "IP")]
    pub vms: Vec<String>,

    /// Range start, local wall-clock time (YYYY-MM-DDTHH:MM)
    #[arg(long, value_name = "DATETIME")]
    pub start: String,

    /// Range end, local wall-clock time (YYYY-MM-DDTHH:MM)
    #[arg(long, value_name = "DATETIME")]
    pub end: String,
}
