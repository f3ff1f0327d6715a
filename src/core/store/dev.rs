//! Local dev store backend.
//!
//! Reads secrets from a plain TOML file of `name = "value"` pairs so builds
//! can run offline and integration tests need no network. Not intended for
//! anything beyond development: the file is clear text.

use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::config::DevConfig;
use crate::core::constants;
use crate::core::store::{Fetched, SecretStore, StoreSession};
use crate::error::StoreError;

/// Dev store backed by a local TOML file.
#[derive(Debug, Clone)]
pub struct DevStore {
    path: PathBuf,
}

impl DevStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build the store from the `[dev]` config section.
    pub fn from_config(dev: Option<&DevConfig>) -> Self {
        let path = dev
            .map(|d| d.path.clone())
            .unwrap_or_else(|| constants::DEV_STORE_FILE.to_string());
        Self::new(path)
    }
}

impl SecretStore for DevStore {
    fn name(&self) -> &'static str {
        "dev"
    }

    fn connect(&self) -> std::result::Result<Box<dyn StoreSession + '_>, StoreError> {
        debug!(path = %self.path.display(), "opening dev store");

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            StoreError::Unavailable(format!(
                "cannot read dev store {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let secrets: BTreeMap<String, String> = toml::from_str(&contents).map_err(|e| {
            StoreError::Unavailable(format!(
                "cannot parse dev store {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(Box::new(DevSession { secrets }))
    }
}

/// Session holding the parsed file for one resolution pass.
pub struct DevSession {
    secrets: BTreeMap<String, String>,
}

impl StoreSession for DevSession {
    fn fetch_latest(&self, name: &str) -> std::result::Result<Fetched, StoreError> {
        match self.secrets.get(name) {
            Some(value) => Ok(Fetched::Found(Zeroizing::new(value.clone()))),
            None => Ok(Fetched::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_found_and_not_found() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("secrets.toml");
        std::fs::write(&path, "\"db.password\" = \"hunter2\"\n").unwrap();

        let store = DevStore::new(&path);
        let session = store.connect().unwrap();

        match session.fetch_latest("db.password").unwrap() {
            Fetched::Found(value) => assert_eq!(value.as_str(), "hunter2"),
            Fetched::NotFound => panic!("expected value"),
        }
        assert!(matches!(
            session.fetch_latest("missing.secret").unwrap(),
            Fetched::NotFound
        ));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let store = DevStore::new(tmp.path().join("nope.toml"));
        assert!(matches!(
            store.connect().err(),
            Some(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "not valid toml [[[").unwrap();

        let store = DevStore::new(&path);
        assert!(matches!(
            store.connect().err(),
            Some(StoreError::Unavailable(_))
        ));
    }
}
