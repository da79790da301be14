//! `wattview energy` — the full pipeline in one shot: commit servers,
//! fetch VMs, select, validate the range, and post the energy request.

use chrono::Local;

use wattview_api::ApiClient;
use wattview_core::{
    CoreError, DateField, DateRangeInput, EnergyReport, VmInventory, VmSelection, build_request,
};

use crate::cli::{EnergyArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &ApiClient,
    args: EnergyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let committed = util::commit_servers(client, &args.servers).await?;
    let listing = client
        .list_vms(&committed)
        .await
        .map_err(|e| CliError::Core(CoreError::from(e)))?;
    let inventory = VmInventory::from_listing(listing, &committed);

    let selection = select_vms(&inventory, &args.vms)?;

    let mut range = DateRangeInput::new();
    range.set(DateField::Start, args.start);
    range.set(DateField::End, args.end);

    let request = build_request(&selection, &inventory, &range, &Local).map_err(|errors| {
        CliError::Validation {
            message: errors.values().cloned().collect::<Vec<_>>().join("\n"),
        }
    })?;

    let report = client
        .compute_energy(&request)
        .await
        .map_err(|e| CliError::Core(CoreError::from(e)))?;

    let out = output::render_single(&global.output, &report, format_report, |r| {
        r.display_value()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Select the requested VM ips, or every fetched VM when none given.
fn select_vms(inventory: &VmInventory, ips: &[String]) -> Result<VmSelection, CliError> {
    let mut selection = VmSelection::new();

    if ips.is_empty() {
        for entry in inventory.entries() {
            let Some(server_id) = entry.server_id else {
                continue;
            };
            for vm in &entry.vms {
                selection.toggle(server_id, vm.clone(), true);
            }
        }
        return Ok(selection);
    }

    for ip in ips {
        let found = inventory.entries().iter().find_map(|entry| {
            let server_id = entry.server_id?;
            entry
                .vms
                .iter()
                .find(|vm| vm.ip == *ip)
                .map(|vm| (server_id, vm.clone()))
        });
        let Some((server_id, vm)) = found else {
            return Err(CliError::Usage {
                message: format!("no VM with ip {ip} on the selected servers"),
            });
        };
        selection.toggle(server_id, vm, true);
    }
    Ok(selection)
}

fn format_report(report: &EnergyReport) -> String {
    if report.is_null() {
        "No data available".to_owned()
    } else {
        format!("Total Consumption: {} kWh", report.display_value())
    }
}
