//! Hoist - fetch secrets from a secret manager and inject them into build properties.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hoist::cli::output;
use hoist::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("HOIST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("hoist=debug")
        } else {
            EnvFilter::new("hoist=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command) {
        // Format error with suggestion if available
        let error_msg = e.to_string();
        let suggestion = match &e {
            hoist::error::Error::Config(hoist::error::ConfigError::NotInitialized) => {
                Some("run: hoist init")
            }
            hoist::error::Error::Store(hoist::error::StoreError::Unavailable(_)) => {
                Some("check store credentials (e.g. HOIST_GCP_ACCESS_TOKEN) and network access")
            }
            _ => None,
        };

        output::error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
