// Device HTTP client
//
// Wraps `reqwest::Client` with MADA-specific URL construction and
// response handling. The device exposes three endpoints: the capability
// manifest at `/mada`, the status document at `/rpc/mada.GetStatus`, and
// per-entity command endpoints at `/rpc/<Endpoint>.Set`.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::manifest::DeviceManifest;

/// Raw HTTP client for one MADA irrigation controller.
///
/// Holds the device base URL and a `reqwest::Client` whose per-request
/// timeout bounds every call. A request that outlives the timeout fails
/// with a transport error and its response future is dropped — a late
/// answer from the device is never observed by callers.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DeviceClient {
    /// Create a client for the device at `host`.
    ///
    /// `host` may be a bare host or host:port (`"192.168.4.20"`); a scheme
    /// is added if missing. The firmware only speaks plain HTTP.
    pub fn new(host: &str, transport: &crate::TransportConfig) -> Result<Self, Error> {
        let raw = if host.contains("://") {
            host.to_owned()
        } else {
            format!("http://{host}")
        };
        let base_url = Url::parse(&raw)?;
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Wrap a pre-built `reqwest::Client` (tests, shared pools).
    pub fn from_reqwest(host: &str, http: reqwest::Client) -> Result<Self, Error> {
        let raw = if host.contains("://") {
            host.to_owned()
        } else {
            format!("http://{host}")
        };
        let base_url = Url::parse(&raw)?;
        Ok(Self { http, base_url })
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the capability manifest: `GET /mada`.
    pub async fn fetch_manifest(&self) -> Result<DeviceManifest, Error> {
        let url = self.url("/mada");
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        parse_json(resp).await
    }

    /// Fetch the status document: `GET /rpc/mada.GetStatus`.
    ///
    /// The document's shape is opaque here — it is returned as a raw JSON
    /// object for path-based navigation by the caller. A non-object body
    /// is a deserialization error, same as malformed JSON.
    pub async fn fetch_status(&self) -> Result<Map<String, Value>, Error> {
        let url = self.url("/rpc/mada.GetStatus");
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        parse_json(resp).await
    }

    /// Issue a command: `POST /rpc/<endpoint>` with a JSON body.
    ///
    /// HTTP 200 means the device accepted the command; any other status
    /// is an error. The response body, if any, is ignored.
    pub async fn send_command(&self, endpoint: &str, body: &impl Serialize) -> Result<(), Error> {
        let url = self.url(&format!("/rpc/{endpoint}"));
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::OK {
            Ok(())
        } else {
            Err(Error::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            })
        }
    }

}

// ── Response handling ────────────────────────────────────────────────

async fn parse_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}
