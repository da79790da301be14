//! Command handlers, one module per subcommand.

pub mod energy;
pub mod servers;
pub mod vms;

mod util;

use wattview_api::ApiClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    client: &ApiClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Servers => servers::handle(client, global).await,
        Command::Vms(args) => vms::handle(client, args, global).await,
        Command::Energy(args) => energy::handle(client, args, global).await,
    }
}
