//! Pluggable config validation strategies
//!
//! The descriptor never validates itself; whoever consumes it checks it at
//! startup. Schema validation needs no filesystem, `FsValidator` adds the
//! on-disk checks the CLI wants.

use std::path::{Path, PathBuf};

use crate::descriptor::BuildConfig;
use crate::error::{ConfigError, ResolveError, Result};

const VUE_LOADER: &str = "vue-loader";
const VUE_LOADER_PLUGIN: &str = "VueLoaderPlugin";

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use galley_config::{BuildConfig, SchemaValidator, ConfigValidator};
///
/// let config = BuildConfig::vue_default();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        if config.entry.is_empty() {
            return Err(ConfigError::NoEntries);
        }
        if config.entry.iter().any(|entry| entry.trim().is_empty()) {
            return Err(ConfigError::schema(
                "entry points cannot be empty",
                "Remove empty strings from the 'entry' array",
            ));
        }

        if config.output.filename.trim().is_empty() {
            return Err(ConfigError::schema(
                "output filename cannot be empty",
                "Set output.filename, e.g. \"bundle.js\"",
            ));
        }

        for (index, rule) in config.rules.iter().enumerate() {
            if rule.test.as_str().is_empty() {
                return Err(ConfigError::schema(
                    format!("rule #{index} has an empty test pattern"),
                    "An empty pattern matches every file; write the extension pattern explicitly",
                ));
            }
            if rule.uses.is_empty() {
                return Err(ConfigError::schema(
                    format!("rule #{index} ({}) has no loader", rule.test),
                    "Set 'loader' or 'use' on the rule",
                ));
            }
            if rule.uses.iter().any(|u| u.loader.trim().is_empty()) {
                return Err(ConfigError::schema(
                    format!("rule #{index} ({}) names an empty loader", rule.test),
                    "Loader names must be non-empty",
                ));
            }
        }

        if config.resolve.alias.keys().any(|key| key.trim_end_matches('$').is_empty()) {
            return Err(ConfigError::schema(
                "alias keys cannot be empty",
                "Remove the empty key from resolve.alias",
            ));
        }
        if config.resolve.extensions.iter().any(|ext| ext.len() < 2) {
            return Err(ConfigError::schema(
                "resolve.extensions contains an empty extension",
                "Use extensions such as \".js\" or \".vue\"",
            ));
        }

        if let Some(dev) = &config.dev_server {
            for (prefix, entry) in &dev.proxy {
                if !prefix.starts_with('/') {
                    return Err(ConfigError::schema(
                        format!("proxy key '{prefix}' must start with '/'"),
                        "Proxy keys are request path prefixes such as \"/api\"",
                    ));
                }
                if !is_http_origin(entry.target()) {
                    return Err(ConfigError::schema(
                        format!("proxy target for '{prefix}' is not an http(s) URL: {}", entry.target()),
                        "Use an absolute origin such as \"http://localhost:8080\"",
                    ));
                }
            }
        }

        let uses_vue_loader = config.rules.iter().any(|rule| rule.uses_loader(VUE_LOADER));
        let has_vue_plugin = config.plugins.iter().any(|p| p.name == VUE_LOADER_PLUGIN);
        if uses_vue_loader && !has_vue_plugin {
            return Err(ConfigError::schema(
                "vue-loader was used without the corresponding plugin",
                "Add a \"VueLoaderPlugin\" entry to plugins",
            ));
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that entries resolve, the output
/// directory is writable and the dev-server content base exists.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let resolver = config.resolver(&self.root);
        for entry in &config.entry {
            if let Err(ResolveError::ModuleNotFound { tried, .. }) =
                resolver.resolve(entry, &self.root)
            {
                return Err(ConfigError::EntryNotFound {
                    entry: entry.clone(),
                    root: self.root.clone(),
                    tried,
                });
            }
        }

        check_writable(&config.output.dir_in(&self.root))?;

        if let Some(dev) = &config.dev_server {
            let base = if dev.content_base.is_absolute() {
                dev.content_base.clone()
            } else {
                self.root.join(&dev.content_base)
            };
            if !base.is_dir() {
                return Err(ConfigError::ContentBaseNotFound { path: base });
            }
        }

        Ok(())
    }
}

/// The directory, or its nearest existing ancestor, must be a directory the
/// current process can create files in.
fn check_writable(dir: &Path) -> Result<()> {
    let existing = dir
        .ancestors()
        .find(|candidate| candidate.exists())
        .ok_or_else(|| ConfigError::OutputNotWritable {
            path: dir.to_path_buf(),
            reason: "no existing ancestor".to_string(),
        })?;

    if !existing.is_dir() {
        return Err(ConfigError::OutputNotWritable {
            path: dir.to_path_buf(),
            reason: format!("{} is not a directory", existing.display()),
        });
    }

    tempfile::tempfile_in(existing).map_err(|e| ConfigError::OutputNotWritable {
        path: dir.to_path_buf(),
        reason: format!("cannot create files in {}: {e}", existing.display()),
    })?;
    Ok(())
}

fn is_http_origin(target: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        target
            .strip_prefix(scheme)
            .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'))
    })
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BuildConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_origin_detection() {
        assert!(is_http_origin("http://localhost:8080"));
        assert!(is_http_origin("https://api.example.com"));
        assert!(!is_http_origin("localhost:8080"));
        assert!(!is_http_origin("http://"));
        assert!(!is_http_origin("ftp://files"));
    }

    #[test]
    fn schema_validator_accepts_vue_default() {
        assert!(validate_schema(&BuildConfig::vue_default()).is_ok());
    }

    #[test]
    fn schema_validator_rejects_empty_entries() {
        let config = BuildConfig::default();
        assert!(matches!(
            SchemaValidator.validate(&config).unwrap_err(),
            ConfigError::NoEntries
        ));
    }
}
