//! Wire types for the energy backend.
//!
//! All types match the JSON exchanged with the three endpoints:
//! `GET /servers`, `GET /vms`, and `POST /energy`. The backend keys
//! VM inventories and energy requests by server *name*; the numeric
//! server id exists only in the `/servers` listing. `wattview-core`
//! owns the join between the two.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Servers ──────────────────────────────────────────────────────────

/// Backend-assigned server identifier.
///
/// Opaque to this crate beyond equality and ordering; selection state in
/// `wattview-core` is keyed by it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ServerId(pub u64);

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A managed host exposing VMs — from `GET /servers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub id: ServerId,
    pub name: String,
    pub ip: String,
}

// ── VMs ──────────────────────────────────────────────────────────────

/// A virtual machine hosted on a server.
///
/// Serialized as the two-element array `[name, ip]` the backend uses in
/// both the `/vms` response and the `/energy` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct VmRecord {
    pub name: String,
    pub ip: String,
}

impl VmRecord {
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
        }
    }
}

impl From<(String, String)> for VmRecord {
    fn from((name, ip): (String, String)) -> Self {
        Self { name, ip }
    }
}

impl From<VmRecord> for (String, String) {
    fn from(vm: VmRecord) -> Self {
        (vm.name, vm.ip)
    }
}

/// `GET /vms` response: wire key (server name) → VMs, in backend order.
pub type VmListing = IndexMap<String, Vec<VmRecord>>;

// ── Energy ───────────────────────────────────────────────────────────

/// UTC date range submitted with an energy request.
///
/// Both bounds are ISO-8601 UTC strings (millisecond precision, `Z`
/// suffix), produced by `wattview-core` at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeUtc {
    pub start: String,
    pub end: String,
}

/// Request body for `POST /energy`.
///
/// Servers with no selected VMs are absent from `vms` entirely — the
/// backend never sees empty lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyRequest {
    pub vms: IndexMap<String, Vec<VmRecord>>,
    #[serde(rename = "dateRange")]
    pub date_range: DateRangeUtc,
}

/// Aggregate energy consumption returned by `POST /energy`.
///
/// The backend's value is opaque to this layer — usually a number of
/// kWh, occasionally a bare string when the backend failed internally.
/// Treated as display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyReport(pub Value);

impl EnergyReport {
    /// Whether the backend reported no data (JSON `null`).
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Human-readable rendering of the raw value: numbers and strings
    /// print bare, anything structured prints as compact JSON.
    pub fn display_value(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn vm_record_roundtrips_as_pair() {
        let vm = VmRecord::new("vm-a", "10.0.0.2");
        let json = serde_json::to_string(&vm).unwrap();
        assert_eq!(json, r#"["vm-a","10.0.0.2"]"#);

        let back: VmRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vm);
    }

    #[test]
    fn energy_request_uses_camel_case_date_range() {
        let mut vms = IndexMap::new();
        vms.insert("s1".to_owned(), vec![VmRecord::new("vm-a", "10.0.0.2")]);
        let req = EnergyRequest {
            vms,
            date_range: DateRangeUtc {
                start: "2024-06-01T07:00:00.000Z".into(),
                end: "2024-06-01T08:00:00.000Z".into(),
            },
        };

        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("dateRange").is_some());
        assert_eq!(json["vms"]["s1"][0][1], "10.0.0.2");
    }

    #[test]
    fn report_display_value_unwraps_scalars() {
        assert_eq!(EnergyReport(serde_json::json!(42.5)).display_value(), "42.5");
        assert_eq!(EnergyReport(serde_json::json!("Error")).display_value(), "Error");
        assert_eq!(
            EnergyReport(serde_json::json!({"total": 1})).display_value(),
            r#"{"total":1}"#
        );
    }
}
