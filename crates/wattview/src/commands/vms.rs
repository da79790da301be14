//! `wattview vms` — fetch VM inventories for a server set.

use serde::Serialize;
use tabled::Tabled;

use wattview_api::ApiClient;
use wattview_core::{CoreError, VmInventory};

use crate::cli::{GlobalOpts, VmsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Clone, Serialize, Tabled)]
struct VmRow {
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "VM")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &ApiClient,
    args: VmsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let committed = util::commit_servers(client, &args.servers).await?;
    let listing = client
        .list_vms(&committed)
        .await
        .map_err(|e| CliError::Core(CoreError::from(e)))?;
    let inventory = VmInventory::from_listing(listing, &committed);

    let rows: Vec<VmRow> = inventory
        .entries()
        .iter()
        .flat_map(|entry| {
            entry.vms.iter().map(|vm| VmRow {
                server: entry.wire_key.clone(),
                name: vm.name.clone(),
                ip: vm.ip.clone(),
            })
        })
        .collect();

    let out = output::render_list(&global.output, &rows, Clone::clone, |r| r.ip.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
