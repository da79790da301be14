//! Central dashboard state — the single source of truth for cross-panel
//! data during one session.
//!
//! Panels read this by reference at render time and mutate it only
//! through actions processed by the app loop, one entry point per
//! field. Each fetchable panel carries its own idle → loading →
//! loaded/error state machine via [`LoadState`].

use wattview_core::{
    DateRangeInput, EnergyReport, Server, ServerSelection, ValidationErrors, VmInventory,
    VmSelection, local_zone_label,
};

/// Fetch lifecycle for one panel's data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed; the message is user-facing.
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// All cross-panel dashboard data.
#[derive(Debug)]
pub struct DashboardState {
    /// Last fetched server list, replaced wholesale on refetch.
    pub servers: Vec<Server>,
    pub servers_load: LoadState,

    /// Staged + committed server checkbox state.
    pub selection: ServerSelection,

    /// VM inventory for the committed set, replaced on every commit.
    pub inventory: VmInventory,
    pub inventory_load: LoadState,

    /// Per-server VM checkbox state.
    pub vm_selection: VmSelection,

    /// Raw date-range strings as typed.
    pub date_range: DateRangeInput,
    /// Validation output of the last submit attempt.
    pub validation: ValidationErrors,

    /// Last successful energy report.
    pub result: Option<EnergyReport>,
    pub result_load: LoadState,

    /// Local UTC-offset label shown next to the date inputs.
    pub zone_label: String,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            servers: Vec::new(),
            servers_load: LoadState::Idle,
            selection: ServerSelection::new(),
            inventory: VmInventory::default(),
            inventory_load: LoadState::Idle,
            vm_selection: VmSelection::new(),
            date_range: DateRangeInput::new(),
            validation: ValidationErrors::new(),
            result: None,
            result_load: LoadState::Idle,
            zone_label: local_zone_label(),
        }
    }

    /// Replace the server list and drop every selection built on the
    /// old one — selections against a conflicting data set are stale.
    pub fn replace_servers(&mut self, servers: Vec<Server>) {
        self.servers = servers;
        self.servers_load = LoadState::Loaded;
        self.selection.clear();
        self.inventory = VmInventory::default();
        self.inventory_load = LoadState::Idle;
        self.vm_selection.clear();
    }

    /// Replace the VM inventory after a commit's fetch resolves, and
    /// reset VM selection to the freshly fetched shape.
    pub fn replace_inventory(&mut self, inventory: VmInventory) {
        self.inventory = inventory;
        self.inventory_load = LoadState::Loaded;
        self.vm_selection.clear();
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wattview_core::{Server, ServerId, VmListing, VmRecord};

    use super::*;

    fn sample_server() -> Server {
        Server {
            id: ServerId(1),
            name: "s1".into(),
            ip: "10.0.0.1".into(),
        }
    }

    #[test]
    fn replacing_servers_resets_downstream_selection() {
        let mut state = DashboardState::new();
        state.selection.toggle(ServerId(1));
        state.selection.commit();
        state
            .vm_selection
            .toggle(ServerId(1), VmRecord::new("vm-a", "10.0.0.2"), true);
        state.inventory_load = LoadState::Loaded;

        state.replace_servers(vec![sample_server()]);

        assert_eq!(state.servers_load, LoadState::Loaded);
        assert_eq!(state.selection.staged_count(), 0);
        assert!(state.selection.committed().is_empty());
        assert!(state.vm_selection.is_empty());
        assert_eq!(state.inventory_load, LoadState::Idle);
    }

    #[test]
    fn replacing_inventory_resets_vm_selection_only() {
        let mut state = DashboardState::new();
        state.servers = vec![sample_server()];
        state.selection.toggle(ServerId(1));
        state.selection.commit();
        state
            .vm_selection
            .toggle(ServerId(1), VmRecord::new("vm-a", "10.0.0.2"), true);

        let mut listing = VmListing::new();
        listing.insert("s1".to_owned(), vec![VmRecord::new("vm-a", "10.0.0.2")]);
        let inventory = VmInventory::from_listing(listing, &state.servers);
        state.replace_inventory(inventory);

        assert_eq!(state.inventory_load, LoadState::Loaded);
        assert!(state.vm_selection.is_empty());
        assert_eq!(state.selection.committed(), &[ServerId(1)]);
    }
}
