// Integration tests for `ApiClient` using wiremock.

use indexmap::IndexMap;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wattview_api::{
    ApiClient, DateRangeUtc, EnergyRequest, Error, Server, ServerId, VmRecord,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn server(id: u64, name: &str, ip: &str) -> Server {
    Server {
        id: ServerId(id),
        name: name.to_owned(),
        ip: ip.to_owned(),
    }
}

// ── /servers ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_servers() {
    let (mock, client) = setup().await;

    let body = json!([
        { "id": 0, "name": "s1", "ip": "10.0.0.1" },
        { "id": 1, "name": "s2", "ip": "10.0.0.5" },
    ]);

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock)
        .await;

    let servers = client.list_servers().await.unwrap();

    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0], server(0, "s1", "10.0.0.1"));
    assert_eq!(servers[1].name, "s2");
}

#[tokio::test]
async fn test_list_servers_non_2xx_is_response_error() {
    let (mock, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock)
        .await;

    let err = client.list_servers().await.unwrap_err();
    match err {
        Error::Response { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_servers_malformed_body_is_decode_error() {
    let (mock, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock)
        .await;

    let err = client.list_servers().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

// ── /vms ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_vms_appends_pairs_in_order() {
    let (mock, client) = setup().await;

    let body = json!({
        "s1": [["vm-a", "10.0.0.2"]],
        "s2": [["vm-b", "10.0.0.6"], ["vm-c", "10.0.0.7"]],
    });

    Mock::given(method("GET"))
        .and(path("/vms"))
        .and(query_param("server", "s1"))
        .and(query_param("ip", "10.0.0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock)
        .await;

    let servers = [server(0, "s1", "10.0.0.1"), server(1, "s2", "10.0.0.5")];
    let listing = client.list_vms(&servers).await.unwrap();

    // The raw query string carries one server/ip pair per server, in
    // selection order.
    let requests = mock.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("server=s1&ip=10.0.0.1&server=s2&ip=10.0.0.5")
    );

    assert_eq!(listing.len(), 2);
    assert_eq!(listing["s1"], vec![VmRecord::new("vm-a", "10.0.0.2")]);
    assert_eq!(listing["s2"].len(), 2);
}

#[tokio::test]
async fn test_list_vms_empty_server_set_sends_no_params() {
    let (mock, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/vms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock)
        .await;

    let listing = client.list_vms(&[]).await.unwrap();
    assert!(listing.is_empty());

    let requests = mock.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

// ── /energy ────────────────────────────────────────────────────────

fn sample_request() -> EnergyRequest {
    let mut vms = IndexMap::new();
    vms.insert("s1".to_owned(), vec![VmRecord::new("vm-a", "10.0.0.2")]);
    EnergyRequest {
        vms,
        date_range: DateRangeUtc {
            start: "2024-06-01T07:00:00.000Z".into(),
            end: "2024-06-01T08:00:00.000Z".into(),
        },
    }
}

#[tokio::test]
async fn test_compute_energy_posts_expected_body() {
    let (mock, client) = setup().await;

    let expected_body = json!({
        "vms": { "s1": [["vm-a", "10.0.0.2"]] },
        "dateRange": {
            "start": "2024-06-01T07:00:00.000Z",
            "end": "2024-06-01T08:00:00.000Z",
        },
    });

    Mock::given(method("POST"))
        .and(path("/energy"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(12.75)))
        .mount(&mock)
        .await;

    let report = client.compute_energy(&sample_request()).await.unwrap();
    assert!(!report.is_null());
    assert_eq!(report.display_value(), "12.75");
}

#[tokio::test]
async fn test_compute_energy_null_report() {
    let (mock, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/energy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&mock)
        .await;

    let report = client.compute_energy(&sample_request()).await.unwrap();
    assert!(report.is_null());
}

#[tokio::test]
async fn test_compute_energy_failure_is_recoverable() {
    let (mock, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/energy"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad range"))
        .mount(&mock)
        .await;

    let err = client.compute_energy(&sample_request()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(!err.is_transient());
}
