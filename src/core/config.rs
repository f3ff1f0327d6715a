//! Configuration file management.
//!
//! Handles reading, writing, and validating `.hoist.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.hoist.toml`
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Metadata and the secret request itself
    pub hoist: Meta,
    /// Optional Google Secret Manager overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<GcpConfig>,
    /// Optional dev-store overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev: Option<DevConfig>,
}

/// Main section of the configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    /// Configuration version
    pub version: String,
    /// Store/project identifier the secrets are resolved against
    #[serde(default)]
    pub project: String,
    /// Store backend: "gcp" (default) or "dev"
    #[serde(default = "default_store")]
    pub store: String,
    /// Postfix appended to each secret name to form the property key
    #[serde(default = "default_postfix")]
    pub postfix: String,
    /// Echo each injected key and clear-text value during injection
    #[serde(default)]
    pub debug: bool,
    /// Behavior when the store connection cannot be established:
    /// "degrade" (warn, continue with zero records) or "fail"
    #[serde(default = "default_on_unavailable")]
    pub on_unavailable: String,
    /// Properties file the resolved secrets are written to
    #[serde(default = "default_output")]
    pub output: String,
    /// Secret names to resolve, in request order
    #[serde(default)]
    pub secrets: Vec<String>,
}

/// Google Secret Manager settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GcpConfig {
    /// REST endpoint, overridable for tests and private access
    #[serde(default)]
    pub endpoint: Option<String>,
    /// HTTP timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Dev-store settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DevConfig {
    /// Path to the TOML file holding `name = "value"` pairs
    pub path: String,
}

fn default_store() -> String {
    "gcp".to_string()
}

fn default_postfix() -> String {
    constants::DEFAULT_POSTFIX.to_string()
}

fn default_on_unavailable() -> String {
    "degrade".to_string()
}

fn default_output() -> String {
    constants::DEFAULT_OUTPUT.to_string()
}

impl Config {
    /// Create a new empty configuration with current version
    pub fn new() -> Self {
        Self {
            hoist: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
                project: String::new(),
                store: default_store(),
                postfix: default_postfix(),
                debug: false,
                on_unavailable: default_on_unavailable(),
                output: default_output(),
                secrets: Vec::new(),
            },
            gcp: None,
            dev: None,
        }
    }

    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Check if a configuration file exists in the current directory
    pub fn exists() -> bool {
        Self::config_path().exists()
    }

    /// Load configuration from `.hoist.toml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if the file doesn't exist,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotInitialized.into());
        }
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            project = %config.hoist.project,
            secrets = config.hoist.secrets.len(),
            store = %config.hoist.store,
            "config loaded"
        );

        // Validate the loaded configuration
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to `.hoist.toml`
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self) -> Result<()> {
        debug!("saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(Self::config_path(), contents)?;

        Ok(())
    }

    /// Validate the configuration structure and contents
    ///
    /// Checks:
    /// - Version field is valid semver
    /// - Store backend is known
    /// - Postfix is non-empty
    /// - `on_unavailable` is a known policy
    ///
    /// Emptiness of `project` and `secrets` is deliberately not checked here;
    /// that is request validation and happens in the pipeline, where CLI
    /// overrides have already been applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::MissingField` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.hoist.version.is_empty() {
            return Err(ConfigError::MissingField { field: "version" }.into());
        }

        // Basic semver shape check
        let version_parts: Vec<&str> = self.hoist.version.split('.').collect();
        if version_parts.len() < 2 {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: format!("not a valid semver: {}", self.hoist.version),
            }
            .into());
        }

        match self.hoist.store.as_str() {
            "gcp" | "dev" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "store",
                    reason: format!("unknown backend: {} (supported: gcp, dev)", other),
                }
                .into());
            }
        }

        if self.hoist.postfix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "postfix",
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        match self.hoist.on_unavailable.as_str() {
            "degrade" | "fail" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "on_unavailable",
                    reason: format!("expected \"degrade\" or \"fail\", got: {}", other),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct TestContext {
        _tmp: TempDir,
        _original_dir: std::path::PathBuf,
    }

    impl Drop for TestContext {
        fn drop(&mut self) {
            // Restore original directory before tempdir is cleaned up
            let _ = std::env::set_current_dir(&self._original_dir);
        }
    }

    fn setup_test_dir() -> TestContext {
        let tmp = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(tmp.path()).unwrap();
        TestContext {
            _tmp: tmp,
            _original_dir: original_dir,
        }
    }

    #[test]
    fn test_config_save_load_roundtrip() {
        let _ctx = setup_test_dir();

        let mut config = Config::new();
        config.hoist.project = "my-project".to_string();
        config.hoist.secrets = vec!["db.password".to_string(), "api.key".to_string()];

        config.save().unwrap();
        assert!(Config::exists());

        let loaded = Config::load().unwrap();
        assert_eq!(loaded.hoist.project, "my-project");
        assert_eq!(loaded.hoist.secrets.len(), 2);
        assert_eq!(loaded.hoist.postfix, "value");
        assert_eq!(loaded.hoist.store, "gcp");
        assert_eq!(loaded.hoist.on_unavailable, "degrade");
    }

    #[test]
    fn test_config_load_missing_file() {
        let _ctx = setup_test_dir();

        let result = Config::load();
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::NotInitialized))
        ));
    }

    #[test]
    fn test_config_defaults_for_sparse_file() {
        let _ctx = setup_test_dir();

        std::fs::write(
            constants::CONFIG_FILE,
            "[hoist]\nversion = \"0.1.0\"\nproject = \"p\"\nsecrets = [\"a\"]\n",
        )
        .unwrap();

        let config = Config::load().unwrap();
        assert_eq!(config.hoist.postfix, "value");
        assert_eq!(config.hoist.output, "build.properties");
        assert!(!config.hoist.debug);
    }

    #[test]
    fn test_config_validate_unknown_store() {
        let mut config = Config::new();
        config.hoist.store = "vault".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_empty_postfix() {
        let mut config = Config::new();
        config.hoist.postfix = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_bad_on_unavailable() {
        let mut config = Config::new();
        config.hoist.on_unavailable = "panic".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_bad_version() {
        let mut config = Config::new();
        config.hoist.version = "nope".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_allows_empty_secret_list() {
        // Request validation happens in the pipeline, not at load time
        let config = Config::new();
        assert!(config.validate().is_ok());
    }
}
