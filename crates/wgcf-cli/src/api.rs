//! Cloudflare WARP client API.
//!
//! Three calls are needed: registering a device, toggling a device's
//! `active` flag (unbind) and fetching the current device record.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, info};
use wgcf_config::AccountRecord;

use crate::error::CliError;

/// Default API base, including the API version.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflareclient.com/v0a2158";

/// Client version reported to the API.
pub const CF_CLIENT_VERSION: &str = "a-6.30";

/// User agent of the official Android client.
pub const USER_AGENT: &str = "okhttp/3.12.1";

/// Header carrying a Zero Trust team token at registration.
pub const TEAM_TOKEN_HEADER: &str = "CF-Access-Jwt-Assertion";

/// HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of a device registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// Device public key (base64).
    pub key: String,
    /// Install id, empty for the CLI.
    pub install_id: String,
    /// Push token, empty for the CLI.
    pub fcm_token: String,
    /// Device model.
    pub model: String,
    /// Device serial number.
    pub serial_number: String,
}

impl RegisterRequest {
    /// A registration request for `public_key` with every other field empty.
    #[must_use]
    pub fn new(public_key: impl Into<String>) -> Self {
        Self { key: public_key.into(), ..Self::default() }
    }
}

/// Body toggling whether a device is bound to its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceStateRequest {
    /// Whether the device stays active.
    pub active: bool,
}

/// Thin client over the WARP API.
#[derive(Debug, Clone)]
pub struct WarpClient {
    http: Client,
    base: String,
}

impl WarpClient {
    /// Creates a client for `base` (see [`DEFAULT_API_BASE`]).
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Http`] if the HTTP client cannot be built.
    pub fn new(base: impl Into<String>) -> Result<Self, CliError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self { http, base: base.into().trim_end_matches('/').to_string() })
    }

    /// URL of the registration collection.
    #[must_use]
    pub fn registration_url(&self) -> String {
        format!("{}/reg", self.base)
    }

    /// URL of a single device registration.
    #[must_use]
    pub fn device_url(&self, id: &str) -> String {
        format!("{}/reg/{id}", self.base)
    }

    /// URL of a device's binding to its account.
    #[must_use]
    pub fn binding_url(&self, id: &str) -> String {
        format!("{}/reg/{id}/account/reg/{id}", self.base)
    }

    /// Registers a device with `public_key`, optionally into a Zero Trust team.
    ///
    /// # Errors
    ///
    /// Returns an HTTP, API status or decoding error.
    pub async fn register(&self, public_key: &str, team_token: Option<&str>) -> Result<AccountRecord, CliError> {
        let mut request = with_client_headers(self.http.post(self.registration_url()));
        if let Some(token) = team_token {
            request = request.header(TEAM_TOKEN_HEADER, token);
        }
        let response = send(request.json(&RegisterRequest::new(public_key))).await?;
        let record: AccountRecord = response.json().await?;
        info!(id = %record.id, "registered device");
        Ok(record)
    }

    /// Marks the device inactive on its account.
    ///
    /// # Errors
    ///
    /// Returns an HTTP or API status error.
    pub async fn unbind(&self, id: &str, token: &str) -> Result<(), CliError> {
        let request = with_client_headers(self.http.patch(self.binding_url(id)))
            .bearer_auth(token)
            .json(&DeviceStateRequest { active: false });
        send(request).await?;
        info!(id, "unbound device");
        Ok(())
    }

    /// Fetches the current device record.
    ///
    /// # Errors
    ///
    /// Returns an HTTP, API status or decoding error.
    pub async fn fetch(&self, id: &str, token: &str) -> Result<AccountRecord, CliError> {
        let request = with_client_headers(self.http.get(self.device_url(id))).bearer_auth(token);
        Ok(send(request).await?.json().await?)
    }
}

fn with_client_headers(request: RequestBuilder) -> RequestBuilder {
    request.header("CF-Client-Version", CF_CLIENT_VERSION)
}

async fn send(request: RequestBuilder) -> Result<Response, CliError> {
    let response = request.send().await?;
    let status = response.status();
    debug!(url = %response.url(), %status, "API response");
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CliError::Api { status: status.as_u16(), body })
}
