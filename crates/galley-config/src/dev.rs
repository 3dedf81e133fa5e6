//! Development server configuration types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Directory static files are served from
    #[serde(default = "default_content_base", alias = "contentBase")]
    pub content_base: PathBuf,

    /// Path prefix → upstream origin
    #[serde(default)]
    pub proxy: IndexMap<String, ProxyEntry>,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            content_base: default_content_base(),
            proxy: IndexMap::new(),
        }
    }
}

/// A proxy target, either as a bare origin or with options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProxyEntry {
    Target(String),
    Detailed(ProxyOptions),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProxyOptions {
    pub target: String,

    /// Replace the `Host` header with the upstream's instead of passing it through
    #[serde(default, alias = "changeOrigin")]
    pub change_origin: bool,

    /// Extra headers added to every forwarded request
    #[serde(default)]
    pub headers: IndexMap<String, String>,
}

impl ProxyEntry {
    pub fn target(&self) -> &str {
        match self {
            ProxyEntry::Target(target) => target,
            ProxyEntry::Detailed(options) => &options.target,
        }
    }

    pub fn change_origin(&self) -> bool {
        match self {
            ProxyEntry::Target(_) => false,
            ProxyEntry::Detailed(options) => options.change_origin,
        }
    }

    pub fn headers(&self) -> Option<&IndexMap<String, String>> {
        match self {
            ProxyEntry::Target(_) => None,
            ProxyEntry::Detailed(options) => Some(&options.headers),
        }
    }
}

pub const DEFAULT_PORT: u16 = 3000;

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_content_base() -> PathBuf {
    PathBuf::from(".")
}
