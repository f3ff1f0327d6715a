//! Secret resolution.
//!
//! One scoped store session per call, one latest-version lookup per requested
//! name, one record per name in the result. Lookups are independent; a
//! missing name or a per-name transport failure never aborts the siblings.

use tracing::debug;

use crate::core::request::{Outcome, ResolvedSet, SecretRecord, SecretRequest};
use crate::core::store::{Fetched, SecretStore};
use crate::error::StoreError;

/// Resolve every requested name against the store.
///
/// The session opened here lives for the duration of this call and is
/// released on every exit path. Lookups run in request order.
///
/// # Errors
///
/// Returns `StoreError::Unavailable` if the connection cannot be
/// established; no per-name fetch is attempted and no records are produced.
/// Per-name failures are not errors at this level: they are recorded as
/// `Outcome::Error` and escalated by the pipeline once all names have been
/// attempted.
pub fn resolve(
    store: &dyn SecretStore,
    request: &SecretRequest,
) -> std::result::Result<ResolvedSet, StoreError> {
    let session = store.connect()?;

    let mut set = ResolvedSet::with_capacity(request.names.len());
    for name in &request.names {
        let outcome = match session.fetch_latest(name) {
            Ok(Fetched::Found(value)) => {
                debug!(name = %name, "resolved latest version");
                Outcome::Found(value)
            }
            Ok(Fetched::NotFound) => {
                debug!(name = %name, "secret not found in store");
                Outcome::NotFound
            }
            Err(e) => {
                debug!(name = %name, error = %e, "fetch failed");
                Outcome::Error(e.to_string())
            }
        };
        set.push(SecretRecord {
            name: name.clone(),
            outcome,
        });
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::testing::FakeStore;

    fn request(names: &[&str]) -> SecretRequest {
        SecretRequest::new("proj", names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_one_record_per_name_in_order() {
        let store = FakeStore::with_secrets(&[("a", "1"), ("c", "3")]);
        let set = resolve(&store, &request(&["a", "b", "c"])).unwrap();

        assert_eq!(set.len(), 3);
        let names: Vec<_> = set.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(set.get("a").unwrap().is_success());
        assert!(!set.get("b").unwrap().is_success());
        assert!(set.get("c").unwrap().is_success());
    }

    #[test]
    fn test_not_found_does_not_abort_siblings() {
        let store = FakeStore::with_secrets(&[("last", "v")]);
        let set = resolve(&store, &request(&["missing", "last"])).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("last").unwrap().value(), Some("v"));
        // both names were actually attempted
        assert_eq!(store.fetched.borrow().len(), 2);
    }

    #[test]
    fn test_per_name_transport_error_recorded() {
        let mut store = FakeStore::with_secrets(&[("ok", "v")]);
        store.fail_names = vec!["flaky".to_string()];

        let set = resolve(&store, &request(&["flaky", "ok"])).unwrap();
        assert!(matches!(
            set.get("flaky").unwrap().outcome,
            Outcome::Error(_)
        ));
        assert!(set.get("ok").unwrap().is_success());
    }

    #[test]
    fn test_unavailable_store_returns_no_records() {
        let store = FakeStore::unavailable();
        let result = resolve(&store, &request(&["a", "b"]));

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(store.connects.get(), 1);
        assert!(store.fetched.borrow().is_empty());
    }

    #[test]
    fn test_duplicate_names_are_idempotent() {
        let store = FakeStore::with_secrets(&[("a", "1")]);
        let set = resolve(&store, &request(&["a", "a"])).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|r| r.value() == Some("1")));
    }
}
