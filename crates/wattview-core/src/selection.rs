//! Selection state for servers and VMs.
//!
//! Server selection is staged (checkbox toggles) and only becomes active
//! on an explicit commit, at which point the VM inventory is refetched
//! for exactly the committed set and VM selection starts over. All state
//! is keyed by [`ServerId`]; the backend's wire key (the server name)
//! appears only inside [`VmInventory`], which performs the join once per
//! fetch.

use indexmap::{IndexMap, IndexSet};
use tracing::warn;

use wattview_api::{Server, ServerId, VmListing, VmRecord};

// ── Server selection ────────────────────────────────────────────────

/// Staged and committed server sets.
///
/// Toggles mutate the staged set only; [`commit`](Self::commit) freezes
/// it as the active query set. Both sets preserve first-toggle order so
/// the `/vms` query parameters follow the order the user selected in.
#[derive(Debug, Default, Clone)]
pub struct ServerSelection {
    staged: IndexSet<ServerId>,
    committed: Vec<ServerId>,
}

impl ServerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a server in the staged set: add if absent, remove if
    /// present. Returns `true` if the server is now staged.
    pub fn toggle(&mut self, id: ServerId) -> bool {
        if self.staged.shift_remove(&id) {
            false
        } else {
            self.staged.insert(id);
            true
        }
    }

    /// Whether a server is currently staged.
    pub fn is_staged(&self, id: ServerId) -> bool {
        self.staged.contains(&id)
    }

    /// Staged ids in first-toggle order.
    pub fn staged(&self) -> impl Iterator<Item = ServerId> + '_ {
        self.staged.iter().copied()
    }

    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// Freeze the staged set as the active query set.
    pub fn commit(&mut self) -> Vec<ServerId> {
        self.committed = self.staged.iter().copied().collect();
        self.committed.clone()
    }

    /// Ids frozen by the last commit.
    pub fn committed(&self) -> &[ServerId] {
        &self.committed
    }

    /// Resolve the committed ids against a server list, in commit order.
    ///
    /// Ids that no longer resolve (the list was refetched underneath the
    /// selection) are skipped with a warning.
    pub fn resolve_committed(&self, servers: &[Server]) -> Vec<Server> {
        self.committed
            .iter()
            .filter_map(|id| {
                let found = servers.iter().find(|s| s.id == *id).cloned();
                if found.is_none() {
                    warn!(%id, "committed server no longer in server list");
                }
                found
            })
            .collect()
    }

    /// Drop all staged and committed state (server list was replaced).
    pub fn clear(&mut self) {
        self.staged.clear();
        self.committed.clear();
    }
}

// ── VM inventory ────────────────────────────────────────────────────

/// One server's slice of the `/vms` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    /// The committed server this wire key resolved to, if any. A key
    /// the backend returned for a server we never committed stays
    /// display-only: without an id it can never enter [`VmSelection`].
    pub server_id: Option<ServerId>,
    /// The backend's key for this server (its name).
    pub wire_key: String,
    pub vms: Vec<VmRecord>,
}

/// What `GET /vms` returned for the committed server set.
///
/// Replaced wholesale on every commit, never patched.
#[derive(Debug, Default, Clone)]
pub struct VmInventory {
    entries: Vec<InventoryEntry>,
}

impl VmInventory {
    /// Join a `/vms` response with the committed servers.
    ///
    /// Entries keep the backend's response order; each wire key is
    /// matched to a committed server by name.
    pub fn from_listing(listing: VmListing, committed: &[Server]) -> Self {
        let entries = listing
            .into_iter()
            .map(|(wire_key, vms)| {
                let server_id = committed.iter().find(|s| s.name == wire_key).map(|s| s.id);
                if server_id.is_none() {
                    warn!(key = %wire_key, "backend returned VMs for an uncommitted server");
                }
                InventoryEntry {
                    server_id,
                    wire_key,
                    vms,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The wire key for a committed server id, if it was fetched.
    pub fn wire_key_for(&self, id: ServerId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.server_id == Some(id))
            .map(|e| e.wire_key.as_str())
    }
}

// ── VM selection ────────────────────────────────────────────────────

/// Per-server VM selection, keyed by server id and VM ip.
///
/// The inner set is keyed by ip so checkbox state stays idempotent:
/// re-checking an already-selected VM is a no-op. A server key present
/// in the map always has at least one VM; deselecting the last VM
/// removes the key.
#[derive(Debug, Default, Clone)]
pub struct VmSelection {
    map: IndexMap<ServerId, IndexMap<String, VmRecord>>,
}

impl VmSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a checkbox transition for one VM.
    pub fn toggle(&mut self, server: ServerId, vm: VmRecord, checked: bool) {
        if checked {
            self.map
                .entry(server)
                .or_default()
                .entry(vm.ip.clone())
                .or_insert(vm);
        } else if let Some(vms) = self.map.get_mut(&server) {
            vms.shift_remove(&vm.ip);
            if vms.is_empty() {
                self.map.shift_remove(&server);
            }
        }
    }

    /// Whether the VM with this ip is selected under the server.
    pub fn is_selected(&self, server: ServerId, ip: &str) -> bool {
        self.map
            .get(&server)
            .is_some_and(|vms| vms.contains_key(ip))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Total number of selected VMs across all servers.
    pub fn vm_count(&self) -> usize {
        self.map.values().map(IndexMap::len).sum()
    }

    /// Servers with at least one selected VM, in selection order.
    pub fn servers(&self) -> impl Iterator<Item = ServerId> + '_ {
        self.map.keys().copied()
    }

    /// Selected VMs under one server, in selection order.
    pub fn vms_for(&self, server: ServerId) -> impl Iterator<Item = &VmRecord> {
        self.map.get(&server).into_iter().flat_map(IndexMap::values)
    }

    /// Reset to empty (inventory was replaced by a new commit).
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
