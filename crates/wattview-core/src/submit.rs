//! Submission assembly: current selection + validated date range → one
//! well-formed `/energy` request.
//!
//! Validation runs first and aborts before any conversion or network
//! activity; both bounds convert to UTC only here, so the raw strings in
//! [`DateRangeInput`] stay untouched.

use chrono::TimeZone;
use indexmap::IndexMap;
use tracing::{debug, warn};

use wattview_api::{DateRangeUtc, EnergyRequest};

use crate::daterange::{self, DateField, DateRangeInput, ValidationErrors};
use crate::selection::{VmInventory, VmSelection};

/// Build the `/energy` request body from the current selection state.
///
/// Returns the validation errors instead of a request when the range is
/// missing a bound, out of order, or unparseable — no partial request is
/// ever produced. Servers with no selected VMs are omitted from the
/// body; selected VMs whose server has no wire key in the current
/// inventory (stale selection) are skipped with a warning.
pub fn build_request<Tz: TimeZone>(
    selection: &VmSelection,
    inventory: &VmInventory,
    range: &DateRangeInput,
    tz: &Tz,
) -> Result<EnergyRequest, ValidationErrors> {
    let mut errors = range.validate();
    if !errors.is_empty() {
        return Err(errors);
    }

    let start = convert_bound(&range.start, DateField::Start, tz, &mut errors);
    let end = convert_bound(&range.end, DateField::End, tz, &mut errors);
    let (Some(start), Some(end)) = (start, end) else {
        return Err(errors);
    };

    let mut vms = IndexMap::new();
    for server_id in selection.servers() {
        let Some(wire_key) = inventory.wire_key_for(server_id) else {
            warn!(%server_id, "selected VMs for a server missing from the inventory");
            continue;
        };
        let selected: Vec<_> = selection.vms_for(server_id).cloned().collect();
        vms.insert(wire_key.to_owned(), selected);
    }

    debug!(servers = vms.len(), "built energy request");
    Ok(EnergyRequest {
        vms,
        date_range: DateRangeUtc { start, end },
    })
}

fn convert_bound<Tz: TimeZone>(
    value: &str,
    field: DateField,
    tz: &Tz,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match daterange::to_utc_in(value, tz) {
        Ok(utc) => Some(utc),
        Err(e) => {
            errors.insert(field, e.to_string());
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    use wattview_api::{Server, ServerId, VmListing, VmRecord};

    use super::*;

    fn fixture() -> (VmSelection, VmInventory) {
        let committed = [
            Server {
                id: ServerId(1),
                name: "s1".into(),
                ip: "10.0.0.1".into(),
            },
            Server {
                id: ServerId(2),
                name: "s2".into(),
                ip: "10.0.0.5".into(),
            },
        ];

        let mut listing = VmListing::new();
        listing.insert("s1".to_owned(), vec![VmRecord::new("vm-a", "10.0.0.2")]);
        listing.insert("s2".to_owned(), vec![VmRecord::new("vm-b", "10.0.0.6")]);
        let inventory = VmInventory::from_listing(listing, &committed);

        let mut selection = VmSelection::new();
        selection.toggle(ServerId(1), VmRecord::new("vm-a", "10.0.0.2"), true);

        (selection, inventory)
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn missing_range_aborts_before_building() {
        let (selection, inventory) = fixture();
        let range = DateRangeInput::new();

        let errors = build_request(&selection, &inventory, &range, &utc()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn body_keys_by_wire_key_and_omits_unselected_servers() {
        let (selection, inventory) = fixture();
        let mut range = DateRangeInput::new();
        range.set(DateField::Start, "2024-06-01T09:00");
        range.set(DateField::End, "2024-06-01T10:00");

        let request = build_request(&selection, &inventory, &range, &utc()).unwrap();

        // Only s1 has selected VMs; s2 is absent, not present-but-empty.
        assert_eq!(request.vms.len(), 1);
        assert_eq!(request.vms["s1"], vec![VmRecord::new("vm-a", "10.0.0.2")]);
        assert_eq!(request.date_range.start, "2024-06-01T09:00:00.000Z");
        assert_eq!(request.date_range.end, "2024-06-01T10:00:00.000Z");
    }

    #[test]
    fn unparseable_bound_becomes_a_field_error() {
        let (selection, inventory) = fixture();
        let mut range = DateRangeInput::new();
        range.set(DateField::Start, "not-a-date");
        range.set(DateField::End, "2024-06-01T10:00");

        let errors = build_request(&selection, &inventory, &range, &utc()).unwrap_err();
        assert!(errors.contains_key(&DateField::Start));
        assert!(!errors.contains_key(&DateField::End));
    }

    #[test]
    fn stale_selection_without_wire_key_is_skipped() {
        let (mut selection, inventory) = fixture();
        // Selection under an id the inventory never fetched.
        selection.toggle(ServerId(9), VmRecord::new("vm-z", "10.0.0.99"), true);

        let mut range = DateRangeInput::new();
        range.set(DateField::Start, "2024-06-01T09:00");
        range.set(DateField::End, "2024-06-01T10:00");

        let request = build_request(&selection, &inventory, &range, &utc()).unwrap();
        assert_eq!(request.vms.len(), 1);
        assert!(request.vms.contains_key("s1"));
    }

    #[test]
    fn empty_vm_selection_posts_empty_map() {
        let (_, inventory) = fixture();
        let selection = VmSelection::new();

        let mut range = DateRangeInput::new();
        range.set(DateField::Start, "2024-06-01T09:00");
        range.set(DateField::End, "2024-06-01T10:00");

        let request = build_request(&selection, &inventory, &range, &utc()).unwrap();
        assert!(request.vms.is_empty());
    }
}
