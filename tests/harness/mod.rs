//! Test harness utilities for hoist integration tests.
//!
//! Provides an isolated project directory per test plus shortcuts for the
//! commands and fixture files the suites need.

use assert_cmd::Command;
use std::process::Output;
use tempfile::TempDir;

/// Test environment with an isolated temp project directory.
pub struct TestEnv {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Create a hoist command running inside the test project directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("hoist").expect("failed to find hoist binary");
        cmd.current_dir(self.dir.path());
        // keep host credentials and endpoint overrides out of the tests
        cmd.env_remove("HOIST_GCP_ACCESS_TOKEN");
        cmd.env_remove("GOOGLE_OAUTH_ACCESS_TOKEN");
        cmd.env_remove("HOIST_GCP_ENDPOINT");
        cmd.env_remove("HOIST_LOG");
        cmd
    }

    /// Write `.hoist.toml` with the given body.
    pub fn write_config(&self, body: &str) {
        std::fs::write(self.dir.path().join(".hoist.toml"), body)
            .expect("failed to write config");
    }

    /// Write a dev-store config for `project` with the given secret names.
    pub fn write_dev_config(&self, project: &str, secrets: &[&str]) {
        self.write_config(&dev_config(project, secrets));
    }

    /// Write `.hoist.dev.toml` with the given name/value pairs.
    pub fn write_dev_store(&self, pairs: &[(&str, &str)]) {
        let mut body = String::new();
        for (name, value) in pairs {
            body.push_str(&format!("\"{}\" = \"{}\"\n", name, value));
        }
        std::fs::write(self.dir.path().join(".hoist.dev.toml"), body)
            .expect("failed to write dev store");
    }

    /// Shortcut for `hoist inject` with extra args.
    pub fn inject(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("inject")
            .args(args)
            .output()
            .expect("failed to run hoist inject")
    }

    /// Shortcut for `hoist check` with extra args.
    pub fn check(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("check")
            .args(args)
            .output()
            .expect("failed to run hoist check")
    }

    /// Read the default properties file, if it was written.
    pub fn read_props(&self) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join("build.properties")).ok()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a `.hoist.toml` body using the dev store.
pub fn dev_config(project: &str, secrets: &[&str]) -> String {
    let list = secrets
        .iter()
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[hoist]\n\
         version = \"0.1.0\"\n\
         project = \"{}\"\n\
         store = \"dev\"\n\
         secrets = [{}]\n",
        project, list
    )
}

/// Assert a command succeeded, printing its output on failure.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

/// Assert a command failed, printing its output on unexpected success.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "command unexpectedly succeeded\nstdout: {}",
        stdout(output)
    );
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
