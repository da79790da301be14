//! Background fetch tasks — one spawned task per backend call,
//! reporting back through the action channel.
//!
//! Each task carries the generation issued when it was spawned; the app
//! loop fences completions against the latest generation, so a task
//! never needs cancellation — a superseded fetch simply resolves into a
//! dropped action. Errors are rendered to their user-facing form here,
//! through [`CoreError`], before they reach the UI.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use wattview_api::ApiClient;
use wattview_core::{CoreError, EnergyRequest, Generation, Server};

use crate::action::Action;

pub fn spawn_list_servers(
    client: Arc<ApiClient>,
    generation: Generation,
    tx: UnboundedSender<Action>,
) {
    tokio::spawn(async move {
        debug!(?generation, "fetching server list");
        let result = client
            .list_servers()
            .await
            .map_err(|e| CoreError::from(e).to_string());
        let _ = tx.send(Action::ServersFetched(generation, result));
    });
}

pub fn spawn_list_vms(
    client: Arc<ApiClient>,
    servers: Vec<Server>,
    generation: Generation,
    tx: UnboundedSender<Action>,
) {
    tokio::spawn(async move {
        debug!(?generation, count = servers.len(), "fetching VM inventory");
        let result = client
            .list_vms(&servers)
            .await
            .map_err(|e| CoreError::from(e).to_string());
        let _ = tx.send(Action::VmsFetched(generation, result));
    });
}

pub fn spawn_compute_energy(
    client: Arc<ApiClient>,
    request: EnergyRequest,
    generation: Generation,
    tx: UnboundedSender<Action>,
) {
    tokio::spawn(async move {
        debug!(?generation, "requesting energy report");
        let result = client
            .compute_energy(&request)
            .await
            .map_err(|e| CoreError::from(e).to_string());
        let _ = tx.send(Action::EnergyFetched(generation, result));
    });
}
