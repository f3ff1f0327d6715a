//! Hoist - fetch secrets from a secret manager and inject them into build properties.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Scaffold .hoist.toml
//! │   ├── inject        # Resolve secrets and write the properties file
//! │   ├── check         # Resolve-only dry run
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .hoist.toml management
//!     ├── request       # SecretRequest / SecretRecord / ResolvedSet
//!     ├── store/        # Secret-store backends
//!     │   ├── mod       # SecretStore + StoreSession traits
//!     │   ├── gcp       # Google Secret Manager REST client
//!     │   └── dev       # Local TOML store for offline development
//!     ├── resolver      # Latest-version lookups, one record per name
//!     ├── props         # PropertySink trait, properties-file target
//!     ├── inject        # name.postfix = value writes
//!     └── pipeline      # validate → resolve → escalate → inject
//! ```
//!
//! # Behavior
//!
//! Hoist runs once per build, ahead of compilation. Every requested secret is
//! fetched at its latest version; a secret that does not exist fails the
//! build. The pipeline entry point ([`core::pipeline::run`]) takes the store
//! and the property sink as trait objects, so a host build system, the CLI,
//! and the test suite all drive the same code path.

pub mod cli;
pub mod core;
pub mod error;
