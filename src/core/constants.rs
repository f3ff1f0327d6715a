//! Constants used throughout hoist.
//!
//! Centralizes magic strings and configuration defaults.

/// Configuration file name (.hoist.toml).
pub const CONFIG_FILE: &str = ".hoist.toml";

/// Default properties file the resolved secrets are written to.
pub const DEFAULT_OUTPUT: &str = "build.properties";

/// Default postfix appended to secret names to form property keys.
pub const DEFAULT_POSTFIX: &str = "value";

/// Google Secret Manager REST endpoint.
pub const GCP_ENDPOINT: &str = "https://secretmanager.googleapis.com/v1";

/// Default HTTP timeout for store requests, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Environment variable carrying the Secret Manager bearer token.
pub const GCP_TOKEN_ENV: &str = "HOIST_GCP_ACCESS_TOKEN";

/// Fallback token variable shared with other Google tooling.
pub const GCP_TOKEN_ENV_FALLBACK: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Environment variable overriding the Secret Manager endpoint.
pub const GCP_ENDPOINT_ENV: &str = "HOIST_GCP_ENDPOINT";

/// Default file backing the dev store.
pub const DEV_STORE_FILE: &str = ".hoist.dev.toml";
