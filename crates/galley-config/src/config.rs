//! Top-level configuration file structure.
//!
//! A config file is a `BuildConfig` plus named `profiles` that overlay it.
//! For file discovery, see the `discovery` module.

use figment::{Figment, providers::Env};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::descriptor::BuildConfig;
use crate::error::{ConfigError, Result as ConfigResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleyConfig {
    #[serde(flatten)]
    pub build: BuildConfig,

    /// Environment overlays, deep-merged over the base when selected
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub profiles: IndexMap<String, Value>,
}

impl GalleyConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use galley_config::GalleyConfig;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "entry": ["./src/main.js"],
    ///     "output": { "filename": "app.js", "path": "public" }
    /// });
    ///
    /// let config = GalleyConfig::from_value(value).unwrap();
    /// assert_eq!(config.build.output.filename, "app.js");
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid("config", e))
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid("config", e))
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    /// Produce the effective descriptor for `profile` (or the base when `None`).
    pub fn materialize_profile(self, profile: Option<&str>) -> ConfigResult<BuildConfig> {
        let Some(name) = profile else {
            return Ok(self.build);
        };

        let overlay = self
            .profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
                available: self.profile_names(),
            })?;

        debug!(profile = name, "applying profile overlay");
        overlay_build(&self.build, overlay).map_err(|message| {
            ConfigError::InvalidProfileOverride {
                message: format!("profile '{name}': {message}"),
            }
        })
    }
}

/// Layer `PREFIX`-prefixed environment variables over `build`.
///
/// `__` separates nesting levels: `GALLEY_DEV_SERVER__PORT=9000` sets
/// `dev_server.port`.
pub fn apply_env_overrides(build: BuildConfig, prefix: &str) -> ConfigResult<BuildConfig> {
    let overlay: Value = Figment::from(Env::prefixed(prefix).split("__"))
        .extract()
        .map_err(|e| ConfigError::invalid("environment", e))?;

    if overlay.as_object().is_none_or(|map| map.is_empty()) {
        return Ok(build);
    }

    debug!(prefix, "applying environment overrides");
    overlay_build(&build, &overlay).map_err(|message| ConfigError::InvalidValue {
        field: "environment".to_string(),
        hint: Some(message),
    })
}

fn overlay_build(base: &BuildConfig, overlay: &Value) -> std::result::Result<BuildConfig, String> {
    if overlay.is_null() {
        return Ok(base.clone());
    }

    let mut overlay = overlay.clone();
    canonicalize_aliases(&mut overlay);

    let mut merged = serde_json::to_value(base).map_err(|e| e.to_string())?;
    merge_values(&mut merged, &overlay);
    serde_json::from_value(merged).map_err(|e| e.to_string())
}

/// Rename the camelCase spellings a config file may use to the field names
/// the base serializes with, so both land on the same key when merged.
fn canonicalize_aliases(overlay: &mut Value) {
    let Some(dev) = overlay.get_mut("dev_server").and_then(Value::as_object_mut) else {
        return;
    };
    rename_key(dev, "contentBase", "content_base");

    if let Some(proxy) = dev.get_mut("proxy").and_then(Value::as_object_mut) {
        for entry in proxy.values_mut() {
            if let Some(options) = entry.as_object_mut() {
                rename_key(options, "changeOrigin", "change_origin");
            }
        }
    }
}

/// Both spellings at once are left alone for deserialization to reject.
fn rename_key(map: &mut serde_json::Map<String, Value>, alias: &str, canonical: &str) {
    if map.contains_key(canonical) {
        return;
    }
    if let Some(value) = map.remove(alias) {
        map.insert(canonical.to_string(), value);
    }
}

/// Deep merge: objects merge key by key, everything else replaces.
pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
