//! Property injection.
//!
//! Writes one `name.postfix = value` entry per successfully resolved secret
//! into a [`PropertySink`]. Records that did not resolve are never written;
//! the pipeline has already decided whether the run fails before this runs.

use tracing::info;

use crate::core::props::PropertySink;
use crate::core::request::ResolvedSet;
use crate::error::InjectError;

/// Derive the property key for a secret name.
pub fn property_key(name: &str, postfix: &str) -> String {
    format!("{}.{}", name, postfix)
}

/// Inject all success records into the sink.
///
/// When `verbose` is set, each write is echoed to the diagnostic log with the
/// clear-text value. That is an explicit opt-in trade-off: debug visibility
/// over secrecy.
///
/// # Errors
///
/// Returns `InjectError` if the sink rejects a write.
pub fn inject(
    records: &ResolvedSet,
    postfix: &str,
    sink: &mut dyn PropertySink,
    verbose: bool,
) -> std::result::Result<(), InjectError> {
    for record in records.successes() {
        let key = property_key(&record.name, postfix);
        let value = record.value().unwrap_or_default();
        if verbose {
            info!("adding {} = {}", key, value);
        }
        sink.set(&key, value)?;
    }
    Ok(())
}
