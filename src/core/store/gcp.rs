//! Google Secret Manager store backend.
//!
//! Talks to Secret Manager over HTTPS using a bearer token supplied via
//! environment variables. Only the `versions/latest:access` operation is
//! used; hoist never pins versions and never writes to the store.
//!
//! ## Requirements
//!
//! - `HOIST_GCP_ACCESS_TOKEN` (or `GOOGLE_OAUTH_ACCESS_TOKEN`) must hold a
//!   valid bearer token
//! - The token's principal needs `secretmanager.versions.access` on the
//!   requested secrets

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::config::GcpConfig;
use crate::core::constants;
use crate::core::store::{Fetched, SecretStore, StoreSession};
use crate::error::StoreError;

/// Google Secret Manager client configuration.
#[derive(Debug, Clone)]
pub struct GcpStore {
    project: String,
    endpoint: String,
    timeout: Duration,
}

impl GcpStore {
    /// Build the store from the `[gcp]` config section and environment.
    ///
    /// Endpoint precedence: `HOIST_GCP_ENDPOINT` env var, then config, then
    /// the public Secret Manager endpoint.
    pub fn from_config(project: &str, gcp: Option<&GcpConfig>) -> Self {
        let endpoint = std::env::var(constants::GCP_ENDPOINT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| gcp.and_then(|g| g.endpoint.clone()))
            .unwrap_or_else(|| constants::GCP_ENDPOINT.to_string());

        let timeout = gcp
            .and_then(|g| g.timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS));

        Self {
            project: project.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn access_token() -> std::result::Result<String, StoreError> {
        std::env::var(constants::GCP_TOKEN_ENV)
            .or_else(|_| std::env::var(constants::GCP_TOKEN_ENV_FALLBACK))
            .map_err(|_| {
                StoreError::Unavailable(format!(
                    "no access token: set {} or {}",
                    constants::GCP_TOKEN_ENV,
                    constants::GCP_TOKEN_ENV_FALLBACK
                ))
            })
    }
}

impl SecretStore for GcpStore {
    fn name(&self) -> &'static str {
        "gcp"
    }

    fn connect(&self) -> std::result::Result<Box<dyn StoreSession + '_>, StoreError> {
        debug!(project = %self.project, endpoint = %self.endpoint, "connecting to Secret Manager");

        let token = Self::access_token()?;
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(format!("failed to build http client: {}", e)))?;

        Ok(Box::new(GcpSession {
            store: self,
            client,
            token,
        }))
    }
}

/// One connected session; the HTTP client is released when this drops.
pub struct GcpSession<'a> {
    store: &'a GcpStore,
    client: Client,
    token: String,
}

#[derive(Deserialize)]
struct AccessResponse {
    payload: Option<AccessPayload>,
}

#[derive(Deserialize)]
struct AccessPayload {
    data: Option<String>,
}

impl StoreSession for GcpSession<'_> {
    fn fetch_latest(&self, name: &str) -> std::result::Result<Fetched, StoreError> {
        let url = format!(
            "{}/projects/{}/secrets/{}/versions/latest:access",
            self.store.endpoint, self.store.project, name
        );
        trace!(name, "accessing latest secret version");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| StoreError::Fetch {
                name: name.to_string(),
                reason: format!("http request failed: {}", e),
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(Fetched::NotFound),
            status if status.is_success() => {
                let body = response.text().unwrap_or_default();
                let parsed: AccessResponse =
                    serde_json::from_str(&body).map_err(|e| StoreError::Fetch {
                        name: name.to_string(),
                        reason: format!("failed to decode access response: {}", e),
                    })?;
                let data = parsed
                    .payload
                    .and_then(|payload| payload.data)
                    .ok_or_else(|| StoreError::Fetch {
                        name: name.to_string(),
                        reason: "secret payload missing data".to_string(),
                    })?;
                let decoded = STANDARD.decode(data).map_err(|e| StoreError::Fetch {
                    name: name.to_string(),
                    reason: format!("base64 decode failed: {}", e),
                })?;
                let text = String::from_utf8(decoded).map_err(|_| StoreError::InvalidPayload {
                    name: name.to_string(),
                })?;
                Ok(Fetched::Found(Zeroizing::new(text)))
            }
            status => {
                let details = response.text().unwrap_or_default();
                Err(StoreError::Fetch {
                    name: name.to_string(),
                    reason: format!("{} {}", status, details),
                })
            }
        }
    }
}
