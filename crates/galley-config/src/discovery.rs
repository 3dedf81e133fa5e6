//! File-based config discovery for CLI use
//!
//! Finds the project's configuration file, refuses to guess between several,
//! and produces the effective descriptor for a profile.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{GalleyConfig, apply_env_overrides};
use crate::descriptor::BuildConfig;
use crate::error::{ConfigError, Result};

/// Dedicated config file names, in the order they are reported.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["galley.toml", "galley.json"];

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "GALLEY_";

const PACKAGE_JSON_FIELD: &str = "galley";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use galley_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let build = discovery.load_build(Some("staging")).unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    env_prefix: Option<String>,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            env_prefix: Some(ENV_PREFIX.to_string()),
        }
    }

    /// Skip environment overrides (useful for tests and reproducible checks)
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every configuration source present in the root.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .filter(|path| path.is_file())
            .collect();

        let pkg_path = self.root.join("package.json");
        if package_json_has_field(&pkg_path) {
            found.push(pkg_path);
        }

        found
    }

    /// Find the single config file in the root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AmbiguousConfig` when more than one source is present.
    pub fn find(&self) -> Result<Option<PathBuf>> {
        let mut candidates = self.candidates();
        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            _ => Err(ConfigError::AmbiguousConfig { candidates }),
        }
    }

    /// Load config from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<GalleyConfig> {
        let path = self.find()?.ok_or(ConfigError::NotFound)?;
        load_file(&path)
    }

    /// Load the discovered file, or the built-in Vue configuration when none exists.
    pub fn load_or_default(&self) -> Result<GalleyConfig> {
        match self.find()? {
            Some(path) => load_file(&path),
            None => {
                info!(root = %self.root.display(), "no config file found, using built-in defaults");
                Ok(GalleyConfig {
                    build: BuildConfig::vue_default(),
                    ..GalleyConfig::default()
                })
            }
        }
    }

    /// Effective descriptor: file (or defaults), then profile, then environment.
    pub fn load_build(&self, profile: Option<&str>) -> Result<BuildConfig> {
        let build = self.load_or_default()?.materialize_profile(profile)?;
        match &self.env_prefix {
            Some(prefix) => apply_env_overrides(build, prefix),
            None => Ok(build),
        }
    }
}

/// Load a config from a specific file.
///
/// Accepts `.toml`, `.json`, and `package.json` (reading its `galley` field).
pub fn load_file(path: &Path) -> Result<GalleyConfig> {
    debug!(path = %path.display(), "loading config");

    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        return load_from_package_json(path);
    }

    let content = fs::read_to_string(path)?;
    let value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            let toml_val: toml::Value = toml::from_str(&content)
                .map_err(|e| ConfigError::invalid("toml", format!("Invalid TOML syntax: {e}")))?;
            serde_json::to_value(toml_val).map_err(|e| {
                ConfigError::invalid("toml", format!("TOML to JSON conversion failed: {e}"))
            })?
        }
        Some("json") => parse_json(&content, "json")?,
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    GalleyConfig::from_value(value)
}

fn load_from_package_json(path: &Path) -> Result<GalleyConfig> {
    let content = fs::read_to_string(path)?;

    let parsed = parse_json(&content, "package.json")?;

    let value = parsed
        .get(PACKAGE_JSON_FIELD)
        .filter(|v| !v.is_null())
        .ok_or_else(|| {
            ConfigError::invalid(
                PACKAGE_JSON_FIELD,
                "Add a non-null 'galley' field to your package.json",
            )
        })?;

    GalleyConfig::from_value(value.clone())
}

fn package_json_has_field(path: &Path) -> bool {
    let Ok(content) = fs::read_to_string(path) else {
        return false;
    };
    serde_json::from_str::<Value>(&content)
        .map(|parsed| {
            parsed
                .get(PACKAGE_JSON_FIELD)
                .is_some_and(|field| !field.is_null())
        })
        .unwrap_or(false)
}

/// Parse JSON, rejecting objects that repeat a key. `Value` would keep the
/// last one silently.
fn parse_json(content: &str, field: &str) -> Result<Value> {
    serde_json::from_str::<UniqueKeys>(content)
        .and_then(|_| serde_json::from_str(content))
        .map_err(|e| ConfigError::invalid(field, format!("Invalid JSON: {e}")))
}

/// Accepts any JSON document in which no object repeats a key.
struct UniqueKeys;

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(UniqueKeysVisitor)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = UniqueKeys;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<UniqueKeys, A::Error> {
        while seq.next_element::<UniqueKeys>()?.is_some() {}
        Ok(UniqueKeys)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<UniqueKeys, A::Error> {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            if !seen.insert(key.clone()) {
                return Err(de::Error::custom(format!("duplicate key '{key}'")));
            }
            map.next_value::<UniqueKeys>()?;
        }
        Ok(UniqueKeys)
    }
}
