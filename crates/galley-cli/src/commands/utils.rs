//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};

use galley_config::{BuildConfig, ConfigDiscovery};
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::error::Result;

/// Discovery rooted at `--cwd`, honoring `--no-env`.
pub fn discovery(global: &GlobalArgs) -> ConfigDiscovery {
    let discovery = ConfigDiscovery::new(&global.cwd);
    if global.use_env {
        discovery
    } else {
        discovery.without_env()
    }
}

/// The effective descriptor for `--cwd` and `--profile`.
pub fn load_build(global: &GlobalArgs) -> Result<BuildConfig> {
    let build = discovery(global).load_build(global.profile.as_deref())?;
    debug!(
        root = %global.cwd.display(),
        profile = global.profile.as_deref().unwrap_or("<base>"),
        "loaded configuration"
    );
    Ok(build)
}

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
