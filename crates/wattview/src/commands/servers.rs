//! `wattview servers` — list servers known to the backend.

use tabled::Tabled;

use wattview_api::ApiClient;
use wattview_core::{CoreError, Server};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
}

impl From<&Server> for ServerRow {
    fn from(s: &Server) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            ip: s.ip.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &ApiClient, global: &GlobalOpts) -> Result<(), CliError> {
    let servers = client
        .list_servers()
        .await
        .map_err(|e| CliError::Core(CoreError::from(e)))?;

    let out = output::render_list(
        &global.output,
        &servers,
        |s| ServerRow::from(s),
        |s| s.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
