//! Init command - scaffold `.hoist.toml`.

use tracing::debug;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Initialize hoist in the current directory.
pub fn execute(project: Option<String>, store: Option<String>) -> Result<()> {
    if Config::exists() {
        return Err(ConfigError::AlreadyInitialized.into());
    }

    let mut config = Config::new();
    if let Some(project) = project {
        config.hoist.project = project;
    }
    if let Some(store) = store {
        config.hoist.store = store;
    }
    config.validate()?;
    config.save()?;

    debug!(store = %config.hoist.store, "initialized");

    output::success(&format!("initialized {}", constants::CONFIG_FILE));
    if config.hoist.project.is_empty() {
        output::hint("set `project` and list your secrets under `secrets`");
    } else {
        output::hint("list your secrets under `secrets`, then run: hoist inject");
    }

    Ok(())
}
