// End-to-end flow test against a mock backend: stage → commit → fetch
// VMs → select → submit, asserting every request the backend sees.

use chrono::FixedOffset;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wattview_api::{ApiClient, ServerId, VmRecord};
use wattview_core::{
    DateField, DateRangeInput, ServerSelection, VmInventory, VmSelection, build_request,
};

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn select_commit_and_submit_round_trip() {
    let mock = MockServer::start().await;
    let client = ApiClient::from_reqwest(&mock.uri(), reqwest::Client::new()).unwrap();

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "s1", "ip": "10.0.0.1" },
        ])))
        .mount(&mock)
        .await;

    Mock::given(method("GET"))
        .and(path("/vms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "s1": [["vm-a", "10.0.0.2"]],
        })))
        .mount(&mock)
        .await;

    Mock::given(method("POST"))
        .and(path("/energy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(3.25)))
        .mount(&mock)
        .await;

    // Stage and commit the one server.
    let servers = client.list_servers().await.unwrap();
    let mut selection = ServerSelection::new();
    selection.toggle(ServerId(1));
    selection.commit();
    let committed = selection.resolve_committed(&servers);

    // Commit triggers the VM fetch for exactly that set.
    let listing = client.list_vms(&committed).await.unwrap();
    let inventory = VmInventory::from_listing(listing, &committed);

    // Check the one VM.
    let mut vm_selection = VmSelection::new();
    vm_selection.toggle(ServerId(1), VmRecord::new("vm-a", "10.0.0.2"), true);

    // Submit with a local wall-clock range (UTC+2 here).
    let mut range = DateRangeInput::new();
    range.set(DateField::Start, "2024-06-01T09:00");
    range.set(DateField::End, "2024-06-01T10:00");
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let request = build_request(&vm_selection, &inventory, &range, &tz).unwrap();

    let report = client.compute_energy(&request).await.unwrap();
    assert_eq!(report.display_value(), "3.25");

    // Inspect what actually went over the wire.
    let requests = mock.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);

    assert_eq!(requests[1].url.path(), "/vms");
    assert_eq!(requests[1].url.query(), Some("server=s1&ip=10.0.0.1"));

    let posted: serde_json::Value = serde_json::from_slice(&requests[2].body).unwrap();
    assert_eq!(posted["vms"], json!({ "s1": [["vm-a", "10.0.0.2"]] }));
    assert_eq!(posted["dateRange"]["start"], "2024-06-01T07:00:00.000Z");
    assert_eq!(posted["dateRange"]["end"], "2024-06-01T08:00:00.000Z");
}
