//! The build configuration descriptor.
//!
//! A `BuildConfig` is built once per invocation, handed to whatever consumes
//! it and never mutated afterwards. The host reads it drives live in
//! [`crate::resolve`], [`crate::transform`] and [`crate::proxy`].

mod helpers;
mod plugin;
mod rule;
mod types;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};

pub use plugin::PluginSpec;
pub use rule::{LoaderUse, Pattern, Rule};
pub use types::Mode;

use crate::dev::{DevServerConfig, ProxyEntry};
use crate::proxy::ProxyTable;
use crate::resolve::Resolver;
use crate::transform::{self, TransformPlan};
use helpers::{
    default_extensions, default_modules, default_output_filename, default_output_path,
    deserialize_extensions,
};

pub(crate) use helpers::normalize_extension;

/// Main build configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build profile
    #[serde(default)]
    pub mode: Mode,

    /// Entry points, bundled in order. The first one is commonly a polyfill.
    #[serde(default)]
    pub entry: Vec<String>,

    #[serde(default)]
    pub output: OutputConfig,

    /// Module rules; the first matching rule governs a file.
    #[serde(default)]
    pub rules: Vec<Rule>,

    #[serde(default)]
    pub resolve: ResolveConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerConfig>,

    /// Build-time extensions, invoked by the host in declaration order
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_filename")]
    pub filename: String,

    /// Destination directory, relative to the project root unless absolute
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: default_output_filename(),
            path: default_output_path(),
        }
    }
}

impl OutputConfig {
    pub fn dir_in(&self, root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            root.join(&self.path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Tried in order when an import omits its extension
    #[serde(
        default = "default_extensions",
        deserialize_with = "deserialize_extensions"
    )]
    pub extensions: Vec<String>,

    /// Logical module name → concrete path. A key ending in `$` only matches
    /// the bare key; other keys also match `key/...` subpaths.
    #[serde(default)]
    pub alias: IndexMap<String, String>,

    /// Directories searched for bare specifiers
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            alias: IndexMap::new(),
            modules: default_modules(),
        }
    }
}

impl BuildConfig {
    /// The Vue front-end configuration this project ships with.
    ///
    /// ```
    /// use galley_config::{BuildConfig, Mode};
    ///
    /// let config = BuildConfig::vue_default();
    /// assert_eq!(config.mode, Mode::Development);
    /// assert_eq!(config.entry[0], "babel-polyfill");
    /// ```
    pub fn vue_default() -> Self {
        let mut alias = IndexMap::new();
        alias.insert("vue$".to_string(), "vue/dist/vue.esm.js".to_string());

        let mut proxy = IndexMap::new();
        proxy.insert(
            "/api".to_string(),
            ProxyEntry::Target("http://localhost:8080".to_string()),
        );

        Self {
            mode: Mode::Development,
            entry: vec![
                "babel-polyfill".to_string(),
                "./javascript/index.js".to_string(),
            ],
            output: OutputConfig {
                filename: "bundle.js".to_string(),
                path: PathBuf::from("static/"),
            },
            rules: vec![
                Rule::new(builtin_pattern(r"\.js$"), vec![LoaderUse::new("babel-loader")])
                    .with_exclude(builtin_pattern("node_modules")),
                Rule::new(
                    builtin_pattern(r"\.(css|sass|scss)$"),
                    vec![LoaderUse::new("sass-loader").with_options(json!({
                        "outputStyle": "expanded",
                        "sourceMap": true
                    }))],
                ),
                Rule::new(
                    builtin_pattern(r"\.(jpg|png|json|svg)$"),
                    vec![LoaderUse::new("url-loader")],
                ),
                Rule::new(builtin_pattern(r"\.vue$"), vec![LoaderUse::new("vue-loader")]),
            ],
            resolve: ResolveConfig {
                extensions: [".js", "json", "jsx"]
                    .iter()
                    .map(|ext| normalize_extension(ext))
                    .collect(),
                alias,
                modules: default_modules(),
            },
            dev_server: Some(DevServerConfig {
                content_base: PathBuf::from("static"),
                proxy,
                ..DevServerConfig::default()
            }),
            plugins: vec![PluginSpec::new("VueLoaderPlugin")],
        }
    }

    /// First-match loader plan for `file`.
    pub fn transform(&self, file: &Path) -> TransformPlan<'_> {
        transform::plan(&self.rules, file)
    }

    /// Import resolver rooted at `root`.
    pub fn resolver(&self, root: impl Into<PathBuf>) -> Resolver<'_> {
        Resolver::new(&self.resolve, root)
    }

    /// Proxy routing table; empty when no dev server is configured.
    pub fn proxy_table(&self) -> ProxyTable {
        self.dev_server
            .as_ref()
            .map(ProxyTable::from_config)
            .unwrap_or_default()
    }
}

fn builtin_pattern(source: &str) -> Pattern {
    // The built-in patterns are literals known to compile.
    Pattern::new(source).unwrap_or_else(|e| panic!("built-in pattern {source:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_normalized_on_load() {
        let resolve: ResolveConfig =
            serde_json::from_value(json!({ "extensions": [".js", "json", "jsx"] })).unwrap();
        assert_eq!(resolve.extensions, vec![".js", ".json", ".jsx"]);
    }

    #[test]
    fn vue_default_roundtrips_through_json() {
        let config = BuildConfig::vue_default();
        let value = serde_json::to_value(&config).unwrap();
        let back: BuildConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn output_dir_is_rooted() {
        let output = OutputConfig::default();
        assert_eq!(output.dir_in(Path::new("/project")), PathBuf::from("/project/dist"));
    }
}
