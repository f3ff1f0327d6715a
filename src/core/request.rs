//! Request and result types for one resolution pass.

use std::fmt;
use zeroize::Zeroizing;

use crate::error::RequestError;

/// A resolved secret value.
///
/// Wrapped in `Zeroizing` so the plaintext is wiped from memory when the
/// resolved set goes out of scope.
pub type SecretValue = Zeroizing<String>;

/// One build invocation's worth of secrets to resolve.
#[derive(Debug, Clone)]
pub struct SecretRequest {
    /// Store/project identifier
    pub project: String,
    /// Secret names in lookup order
    pub names: Vec<String>,
}

impl SecretRequest {
    pub fn new(project: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            project: project.into(),
            names,
        }
    }

    /// Validate the request before any store activity.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::MissingProject` or `RequestError::EmptySecretList`
    /// so invalid input never reaches the network.
    pub fn validate(&self) -> std::result::Result<(), RequestError> {
        if self.project.trim().is_empty() {
            return Err(RequestError::MissingProject);
        }
        if self.names.is_empty() {
            return Err(RequestError::EmptySecretList);
        }
        if self.names.iter().any(|n| n.trim().is_empty()) {
            return Err(RequestError::EmptySecretName);
        }
        Ok(())
    }
}

/// Result of resolving one name.
pub enum Outcome {
    /// Latest version fetched successfully
    Found(SecretValue),
    /// The store has no secret under this name
    NotFound,
    /// Transport failure for this name; carries no value
    Error(String),
}

impl fmt::Debug for Outcome {
    // Never print secret values through Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Found(_) => write!(f, "Found(<redacted>)"),
            Outcome::NotFound => write!(f, "NotFound"),
            Outcome::Error(reason) => write!(f, "Error({:?})", reason),
        }
    }
}

/// One record per requested name.
#[derive(Debug)]
pub struct SecretRecord {
    pub name: String,
    pub outcome: Outcome,
}

impl SecretRecord {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }

    /// The resolved value, if this record succeeded.
    pub fn value(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Found(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Records from one resolution pass, in request order.
///
/// Built once per build invocation and consumed by the injector; never
/// persisted.
#[derive(Debug, Default)]
pub struct ResolvedSet {
    records: Vec<SecretRecord>,
}

impl ResolvedSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: SecretRecord) {
        self.records.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SecretRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SecretRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Records whose latest version was fetched successfully.
    pub fn successes(&self) -> impl Iterator<Item = &SecretRecord> {
        self.records.iter().filter(|r| r.is_success())
    }
}
