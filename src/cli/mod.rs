//! Command-line interface.

pub mod check;
pub mod completions;
pub mod init;
pub mod inject;
pub mod output;

use clap::{Parser, Subcommand};

/// Hoist - fetch secrets from a secret manager and inject them into build properties.
#[derive(Parser)]
#[command(
    name = "hoist",
    about = "Fetch secrets from a secret manager and inject them into build properties",
    version,
    after_help = "Fetch early. Fail loud."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize hoist in the current directory
    Init {
        /// Store/project identifier (e.g. a GCP project id)
        #[arg(long)]
        project: Option<String>,
        /// Store backend to use
        #[arg(long, value_parser = ["gcp", "dev"])]
        store: Option<String>,
    },

    /// Resolve all configured secrets and write the properties file
    Inject {
        /// Override the configured project
        #[arg(long)]
        project: Option<String>,
        /// Override the configured secret list (repeatable)
        #[arg(long = "secret", value_name = "NAME")]
        secrets: Vec<String>,
        /// Override the key postfix (default: value)
        #[arg(long)]
        postfix: Option<String>,
        /// Echo each injected key and clear-text value
        #[arg(long)]
        debug: bool,
        /// Override the output properties file
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },

    /// Resolve secrets and report per-name status without writing anything
    Check {
        /// Override the configured project
        #[arg(long)]
        project: Option<String>,
        /// Override the configured secret list (repeatable)
        #[arg(long = "secret", value_name = "NAME")]
        secrets: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Init { project, store } => init::execute(project, store),
        Inject {
            project,
            secrets,
            postfix,
            debug,
            out,
        } => inject::execute(project, secrets, postfix, debug, out),
        Check { project, secrets } => check::execute(project, secrets),
        Completions { shell } => completions::execute(shell),
    }
}
