// wattview-core: Selection state, validation, and request assembly
// between wattview-api and the consumers (CLI/TUI).

pub mod daterange;
pub mod error;
pub mod fence;
pub mod selection;
pub mod submit;

// ── Primary re-exports ──────────────────────────────────────────────
pub use daterange::{
    DateField, DateRangeError, DateRangeInput, ValidationErrors, local_zone_label, to_utc,
    to_utc_in,
};
pub use error::CoreError;
pub use fence::{FetchKind, FetchSeq, Generation};
pub use selection::{InventoryEntry, ServerSelection, VmInventory, VmSelection};
pub use submit::build_request;

// Re-export the wire types at the crate root for ergonomics.
pub use wattview_api::{
    DateRangeUtc, EnergyReport, EnergyRequest, Server, ServerId, VmListing, VmRecord,
};
