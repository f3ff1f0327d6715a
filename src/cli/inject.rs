//! Inject command.
//!
//! Resolves every configured secret at its latest version and writes the
//! values into the properties file. Any secret that cannot be resolved fails
//! the build step.

use crate::cli::output;
use crate::core::config::Config;
use crate::core::pipeline::{self, OnUnavailable, Options};
use crate::core::props::PropertiesFile;
use crate::core::request::SecretRequest;
use crate::core::store;
use crate::error::Result;

/// Run the injection pipeline with CLI overrides applied on top of config.
pub fn execute(
    project: Option<String>,
    secrets: Vec<String>,
    postfix: Option<String>,
    debug: bool,
    out: Option<String>,
) -> Result<()> {
    let config = Config::load()?;

    let project = project.unwrap_or_else(|| config.hoist.project.clone());
    let names = if secrets.is_empty() {
        config.hoist.secrets.clone()
    } else {
        secrets
    };
    let request = SecretRequest::new(project, names);

    let store = store::from_config(&config, &request.project)?;

    let opts = Options {
        postfix: postfix.unwrap_or_else(|| config.hoist.postfix.clone()),
        verbose: debug || config.hoist.debug,
        // config is validated, so an unknown value cannot reach this point
        on_unavailable: OnUnavailable::parse(&config.hoist.on_unavailable)
            .unwrap_or(OnUnavailable::Degrade),
    };

    let out_path = out.unwrap_or_else(|| config.hoist.output.clone());
    let mut props = PropertiesFile::load_or_empty(&out_path)?;

    let report = pipeline::run(&request, store.as_ref(), &mut props, &opts)?;
    props.save()?;

    output::success(&format!(
        "injected {} of {} secrets into {}",
        report.injected, report.requested, out_path
    ));
    Ok(())
}
