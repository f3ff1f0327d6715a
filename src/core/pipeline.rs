//! Orchestration for one build invocation.
//!
//! Three stages: validate the request, resolve every name, then either
//! escalate unresolved names as one fatal error or inject the values. A run
//! that fails writes nothing: injection only happens after the full resolved
//! set has passed the not-found check.

use tracing::{info, warn};

use crate::core::props::PropertySink;
use crate::core::request::{Outcome, ResolvedSet, SecretRequest};
use crate::core::store::SecretStore;
use crate::core::{inject, resolver};
use crate::error::{RequestError, Result};

/// Behavior when the store connection cannot be established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnUnavailable {
    /// Warn and continue with zero records; the run then fails because every
    /// requested name counts as not found. This mirrors the behavior builds
    /// relied on historically.
    Degrade,
    /// Fail on the transport error itself.
    Fail,
}

impl OnUnavailable {
    /// Parse the config string form ("degrade" / "fail").
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "degrade" => Some(Self::Degrade),
            "fail" => Some(Self::Fail),
            _ => None,
        }
    }
}

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Postfix appended to each name to form the property key
    pub postfix: String,
    /// Echo each injected key and clear-text value
    pub verbose: bool,
    /// Policy for store-connection failure
    pub on_unavailable: OnUnavailable,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            postfix: crate::core::constants::DEFAULT_POSTFIX.to_string(),
            verbose: false,
            on_unavailable: OnUnavailable::Degrade,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct Report {
    pub requested: usize,
    pub injected: usize,
}

/// Resolve the request and inject the values into the sink.
///
/// # Errors
///
/// - `RequestError::MissingProject` / `EmptySecretList` before any store
///   activity
/// - `StoreError::Unavailable` when the connection fails and the policy is
///   [`OnUnavailable::Fail`]
/// - `RequestError::Unresolved` naming every secret that is missing or
///   errored, raised only after all names have been attempted
/// - `InjectError` if the sink rejects a write
pub fn run(
    request: &SecretRequest,
    store: &dyn SecretStore,
    sink: &mut dyn PropertySink,
    opts: &Options,
) -> Result<Report> {
    request.validate()?;

    info!(
        "fetching {} secrets from {} for project [{}]",
        request.names.len(),
        store.name(),
        request.project
    );

    let set = match resolver::resolve(store, request) {
        Ok(set) => set,
        Err(e) => match opts.on_unavailable {
            OnUnavailable::Fail => return Err(e.into()),
            OnUnavailable::Degrade => {
                warn!("error retrieving secrets from store: {}", e);
                ResolvedSet::empty()
            }
        },
    };

    let unresolved = unresolved(request, &set);
    if !unresolved.is_empty() {
        let summary = unresolved
            .iter()
            .map(|(name, reason)| format!("{} ({})", name, reason))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(RequestError::Unresolved { summary }.into());
    }

    inject::inject(&set, &opts.postfix, sink, opts.verbose)?;

    let injected = set.successes().count();
    info!("injected {} of {} secrets", injected, request.names.len());

    Ok(Report {
        requested: request.names.len(),
        injected,
    })
}

/// Requested names without a success record, with a human-readable reason.
///
/// A name with no record at all (the degraded empty set) counts as not found.
pub fn unresolved<'a>(
    request: &'a SecretRequest,
    set: &ResolvedSet,
) -> Vec<(&'a str, String)> {
    let mut missing = Vec::new();
    for name in &request.names {
        match set.get(name) {
            Some(record) if record.is_success() => {}
            Some(record) => {
                let reason = match &record.outcome {
                    Outcome::NotFound => "not found".to_string(),
                    Outcome::Error(e) => format!("store error: {}", e),
                    Outcome::Found(_) => unreachable!(),
                };
                missing.push((name.as_str(), reason));
            }
            None => missing.push((name.as_str(), "not found".to_string())),
        }
    }
    missing
}
