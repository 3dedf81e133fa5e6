//! Check command implementation.
//!
//! Validates the effective configuration against the project on disk and,
//! with `--against`, fails when another config file describes a different
//! build.

use galley_config::{
    BuildConfig, ConfigValidator, FsValidator, apply_env_overrides, compare, load_file,
    ENV_PREFIX,
};

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// 1. Find the single config file (two files in one root are an error)
/// 2. Apply the profile and environment overrides
/// 3. Filesystem validation: entries, output directory, content base
/// 4. Drift against `--against`, if given
pub fn execute(global: &GlobalArgs, args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let discovery = utils::discovery(global);
    match discovery.find()? {
        Some(path) => ui::info(&format!("Using {}", path.display())),
        None => ui::warning("No config file found, using built-in defaults"),
    }

    let build = discovery.load_build(global.profile.as_deref())?;
    FsValidator::new(discovery.root()).validate(&build)?;
    ui::success("Configuration is valid");

    for entry in &build.entry {
        ui::success(&format!("  {entry} resolves"));
    }

    let Some(against) = args.against else {
        return Ok(());
    };

    let path = utils::resolve_path(&against, &global.cwd);
    ui::info(&format!("Comparing with {}", path.display()));

    let mut other = load_file(&path)?.materialize_profile(args.against_profile.as_deref())?;
    if global.use_env {
        other = apply_env_overrides(other, ENV_PREFIX)?;
    }

    check_drift(&build, &other, path)
}

fn check_drift(build: &BuildConfig, other: &BuildConfig, against: std::path::PathBuf) -> Result<()> {
    let drifts = compare(build, other);
    if drifts.is_empty() {
        ui::success("No drift");
        return Ok(());
    }

    ui::error(&format!("Found {} differing field(s):", drifts.len()));
    for drift in &drifts {
        ui::warning(&format!("  - {drift}"));
    }
    Err(CliError::Drift { against, drifts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use galley_config::{DevServerConfig, ProxyEntry};
    use std::path::PathBuf;

    #[test]
    fn identical_configs_pass() {
        let build = BuildConfig::vue_default();
        assert!(check_drift(&build, &build.clone(), PathBuf::from("other.toml")).is_ok());
    }

    #[test]
    fn port_drift_is_an_error() {
        let build = BuildConfig::vue_default();
        let mut other = build.clone();
        let mut dev = DevServerConfig::default();
        dev.content_base = PathBuf::from("static");
        dev.proxy.insert(
            "/api".to_string(),
            ProxyEntry::Target("http://localhost:9080".to_string()),
        );
        other.dev_server = Some(dev);

        let err = check_drift(&build, &other, PathBuf::from("other.toml")).unwrap_err();
        match err {
            CliError::Drift { drifts, .. } => {
                assert_eq!(drifts.len(), 1);
                assert_eq!(drifts[0].field, "dev_server.proxy./api");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
