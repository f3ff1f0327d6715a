//! Secret-store backends.
//!
//! The store is a capability boundary: the resolver only ever sees the
//! [`SecretStore`] and [`StoreSession`] traits, never a concrete vendor
//! client, so test doubles slot in without touching the resolution logic.

pub mod dev;
pub mod gcp;

use crate::core::config::Config;
use crate::core::request::SecretValue;
use crate::error::StoreError;

/// Result of fetching one name from a connected store.
pub enum Fetched {
    /// Latest version payload, UTF-8 text
    Found(SecretValue),
    /// The store has no secret under this name
    NotFound,
}

/// A connected store session, scoped to one resolution pass.
///
/// The session is dropped on every exit path, which releases whatever the
/// backend holds open (HTTP client, file handle).
pub trait StoreSession {
    /// Fetch the latest version payload for `name`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Fetch` on a per-name transport failure; a name
    /// that simply does not exist is `Ok(Fetched::NotFound)`, not an error.
    fn fetch_latest(&self, name: &str) -> std::result::Result<Fetched, StoreError>;
}

/// A secret store that can open sessions.
pub trait SecretStore {
    /// Backend name for logging and display.
    fn name(&self) -> &'static str;

    /// Establish a connection to the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the connection cannot be
    /// established (missing credentials, unreachable endpoint). No per-name
    /// fetch is attempted in that case.
    fn connect(&self) -> std::result::Result<Box<dyn StoreSession + '_>, StoreError>;
}

/// Build the store backend selected by the configuration.
///
/// `project` is the effective store/project identifier, after CLI overrides
/// have been applied on top of the config file.
pub fn from_config(
    config: &Config,
    project: &str,
) -> std::result::Result<Box<dyn SecretStore>, StoreError> {
    match config.hoist.store.as_str() {
        "gcp" => Ok(Box::new(gcp::GcpStore::from_config(
            project,
            config.gcp.as_ref(),
        ))),
        "dev" => Ok(Box::new(dev::DevStore::from_config(config.dev.as_ref()))),
        other => Err(StoreError::UnknownBackend(other.to_string())),
    }
}
