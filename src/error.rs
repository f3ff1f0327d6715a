//! Error types.
//!
//! Errors are grouped by concern into small enums and aggregated into the
//! top-level [`Error`], so callers can match on the category without losing
//! the specific failure.

use thiserror::Error;

/// Top-level error for all hoist operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Inject(#[from] InjectError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("not initialized: run `hoist init` first")]
    NotInitialized,

    #[error("already initialized: .hoist.toml exists")]
    AlreadyInitialized,

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("missing config field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Invalid or unsatisfiable secret requests.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("no secrets requested: add at least one name under `secrets` or pass --secret")]
    EmptySecretList,

    #[error("no project configured: set `project` in .hoist.toml or pass --project")]
    MissingProject,

    #[error("secret names must not be empty")]
    EmptySecretName,

    /// One or more requested names could not be resolved. Raised only after
    /// every requested name has been attempted, so the message lists all of
    /// them, not just the first.
    #[error("unresolved secrets: {summary}")]
    Unresolved { summary: String },
}

/// Secret-store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret store unavailable: {0}")]
    Unavailable(String),

    #[error("fetch failed for `{name}`: {reason}")]
    Fetch { name: String, reason: String },

    #[error("secret `{name}` payload is not valid UTF-8")]
    InvalidPayload { name: String },

    #[error("unknown store backend: {0} (supported: gcp, dev)")]
    UnknownBackend(String),
}

/// Property injection errors.
#[derive(Error, Debug)]
pub enum InjectError {
    #[error("failed to read properties file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write properties file {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid property key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
