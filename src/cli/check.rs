//! Check command - resolve-only dry run.
//!
//! Resolves every configured secret and reports per-name status without
//! writing anything. Exits nonzero if any secret is unresolved, so it can
//! gate a pipeline ahead of the actual injection step.

use crate::cli::output;
use crate::core::config::Config;
use crate::core::pipeline;
use crate::core::request::{ResolvedSet, SecretRequest};
use crate::core::{resolver, store};
use crate::error::{RequestError, Result};

/// Resolve and report, never write.
pub fn execute(project: Option<String>, secrets: Vec<String>) -> Result<()> {
    let config = Config::load()?;

    let project = project.unwrap_or_else(|| config.hoist.project.clone());
    let names = if secrets.is_empty() {
        config.hoist.secrets.clone()
    } else {
        secrets
    };
    let request = SecretRequest::new(project, names);
    request.validate()?;

    let store = store::from_config(&config, &request.project)?;

    let set = match resolver::resolve(store.as_ref(), &request) {
        Ok(set) => set,
        Err(e) => {
            output::warn(&format!("error retrieving secrets from store: {}", e));
            ResolvedSet::empty()
        }
    };

    for record in set.successes() {
        output::list_item(&format!("{} (found)", record.name));
    }

    let unresolved = pipeline::unresolved(&request, &set);
    if unresolved.is_empty() {
        output::success(&format!("all {} secrets resolved", request.names.len()));
        return Ok(());
    }

    for (name, reason) in &unresolved {
        output::list_item(&format!("{} ({})", name, reason));
    }
    let summary = unresolved
        .iter()
        .map(|(name, reason)| format!("{} ({})", name, reason))
        .collect::<Vec<_>>()
        .join(", ");
    Err(RequestError::Unresolved { summary }.into())
}
