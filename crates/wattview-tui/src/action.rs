//! All possible UI actions. Actions are the sole mechanism for state mutation.

use wattview_core::{DateField, EnergyReport, Generation, Server, ServerId, VmListing, VmRecord};

/// Outcome of a background fetch, with errors already rendered to their
/// user-facing form.
pub type FetchResult<T> = Result<T, String>;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    ToggleHelp,

    // ── Server panel ──────────────────────────────────────────────
    RefreshServers,
    ToggleServer(ServerId),
    /// Freeze the staged server set and fetch VM inventories for it.
    CommitServers,

    // ── VM panel ──────────────────────────────────────────────────
    ToggleVm {
        server: ServerId,
        vm: VmRecord,
        checked: bool,
    },

    // ── Date panel ────────────────────────────────────────────────
    SetDateField(DateField, String),

    // ── Submission ────────────────────────────────────────────────
    Submit,

    // ── Fetch completions (from spawned tasks) ────────────────────
    //
    // Each completion carries the generation issued when its fetch was
    // spawned; the app drops completions that are no longer current.
    ServersFetched(Generation, FetchResult<Vec<Server>>),
    VmsFetched(Generation, FetchResult<VmListing>),
    EnergyFetched(Generation, FetchResult<EnergyReport>),
}
