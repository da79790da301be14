// Backend HTTP client
//
// Wraps `reqwest::Client` with URL construction for the three endpoints
// and a single status-then-decode response path. No caching, no retry —
// every call is one request, and every failure maps onto the crate's
// error taxonomy.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{EnergyReport, EnergyRequest, Server, VmListing};
use crate::transport::TransportConfig;

/// HTTP client for the energy backend.
///
/// `base_url` is the backend root (e.g. `http://127.0.0.1:5000`); the
/// three endpoint paths are joined onto it.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Used by tests to point at a mock server without rebuilding
    /// transport settings.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the server list — `GET /servers`.
    pub async fn list_servers(&self) -> Result<Vec<Server>, Error> {
        let url = self.endpoint_url("servers")?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_json(resp).await
    }

    /// Fetch VM inventories for a server set — `GET /vms`.
    ///
    /// One `server`/`ip` query-parameter pair is appended per server,
    /// in slice order, so the backend sees the committed selection
    /// order. The response maps each server's wire key to its VMs.
    pub async fn list_vms(&self, servers: &[Server]) -> Result<VmListing, Error> {
        let mut url = self.endpoint_url("vms")?;
        if !servers.is_empty() {
            let mut query = url.query_pairs_mut();
            for server in servers {
                query.append_pair("server", &server.name);
                query.append_pair("ip", &server.ip);
            }
        }
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_json(resp).await
    }

    /// Compute energy consumption for a VM set and date range —
    /// `POST /energy`.
    ///
    /// A non-2xx status is a recoverable [`Error::Response`] carrying
    /// the body verbatim; callers surface it rather than treating it as
    /// a structural failure.
    pub async fn compute_energy(&self, request: &EnergyRequest) -> Result<EnergyReport, Error> {
        let url = self.endpoint_url("energy")?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_json(resp).await
    }
}

/// Check the status, then decode the body.
///
/// The status is inspected before any decoding so a non-2xx response
/// with a non-JSON body (HTML error pages, bare strings) never shows up
/// as a decode failure.
async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        return Err(Error::Response {
            status: status.as_u16(),
            body,
        });
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            let preview = &body[..body.len().min(200)];
            let message = format!("{e} (body preview: {preview:?})");
            Err(Error::Decode { message, body })
        }
    }
}
