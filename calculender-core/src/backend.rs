//! HTTP client for the calculender server's file generator.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::error::{CalculenderError, CalculenderResult};
use crate::request::EventPayload;

pub const GENERATE_ICS_PATH: &str = "api/generate-ics";

/// Something that turns an event payload into calendar file bytes.
pub trait IcsBackend {
    fn generate_ics(
        &self,
        payload: &EventPayload,
    ) -> impl Future<Output = CalculenderResult<Vec<u8>>> + Send;
}

/// `POST /api/generate-ics` over HTTP.
pub struct HttpBackend {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpBackend {
    /// `timeout` of `None` waits for the server indefinitely.
    pub fn new(server_url: &Url, timeout: Option<Duration>) -> CalculenderResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("calculender/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| CalculenderError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpBackend {
            http,
            endpoint: api_url(server_url, GENERATE_ICS_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl IcsBackend for HttpBackend {
    async fn generate_ics(&self, payload: &EventPayload) -> CalculenderResult<Vec<u8>> {
        debug!(
            url = %self.endpoint,
            is_hebrew = payload.is_hebrew,
            location = %payload.location,
            "requesting calendar file"
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "calendar server unreachable"))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "calendar server rejected request");
            return Err(CalculenderError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        debug!(bytes = body.len(), "received calendar file");
        Ok(body.to_vec())
    }
}

/// Resolve `path` below `base`, keeping any path prefix `base` already has
/// (`https://host/app` + `api/x` = `https://host/app/api/x`).
pub(crate) fn api_url(base: &Url, path: &str) -> CalculenderResult<Url> {
    if base.cannot_be_a_base() {
        return Err(CalculenderError::Config(format!(
            "'{base}' cannot be used as a server URL"
        )));
    }

    let mut base = base.clone();
    base.set_query(None);
    base.set_fragment(None);
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }

    base.join(path)
        .map_err(|e| CalculenderError::Config(format!("Invalid server URL '{base}': {e}")))
}
