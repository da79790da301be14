//! Shared helpers for command handlers.

use wattview_api::ApiClient;
use wattview_core::{CoreError, Server, ServerId, ServerSelection};

use crate::error::CliError;

/// Fetch the server list and commit the requested ids.
///
/// Returns the committed `Server` records in argument order. Unknown
/// ids are a usage error, not a silent skip — a typo'd id must not
/// shrink the query.
pub async fn commit_servers(client: &ApiClient, ids: &[u64]) -> Result<Vec<Server>, CliError> {
    let all = client
        .list_servers()
        .await
        .map_err(|e| CliError::Core(CoreError::from(e)))?;

    let mut selection = ServerSelection::new();
    for raw in ids {
        let id = ServerId(*raw);
        if !all.iter().any(|s| s.id == id) {
            return Err(CliError::Usage {
                message: format!("unknown server id {raw} (run `wattview servers` to list ids)"),
            });
        }
        if !selection.is_staged(id) {
            selection.toggle(id);
        }
    }
    selection.commit();
    Ok(selection.resolve_committed(&all))
}
