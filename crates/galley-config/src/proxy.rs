//! The `proxy` host read: does a dev-server request go upstream or to disk?

use indexmap::IndexMap;

use crate::dev::DevServerConfig;

/// One configured prefix and the origin it forwards to.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRoute {
    pub prefix: String,
    pub target: String,
    pub change_origin: bool,
    pub headers: IndexMap<String, String>,
}

impl ProxyRoute {
    /// Upstream URL for a request; the path and query are forwarded unchanged.
    pub fn upstream_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.target.trim_end_matches('/'), path_and_query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route<'a> {
    Upstream(&'a ProxyRoute),
    Static,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyTable {
    routes: Vec<ProxyRoute>,
}

impl ProxyTable {
    pub fn from_config(config: &DevServerConfig) -> Self {
        let routes = config
            .proxy
            .iter()
            .map(|(prefix, entry)| ProxyRoute {
                prefix: prefix.clone(),
                target: entry.target().to_string(),
                change_origin: entry.change_origin(),
                headers: entry.headers().cloned().unwrap_or_default(),
            })
            .collect();
        Self { routes }
    }

    pub fn routes(&self) -> &[ProxyRoute] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Any path starting with a configured prefix goes upstream. Prefixes are
    /// tried in declaration order and the first match wins, so a narrower
    /// prefix must be declared before a broader one to take effect.
    pub fn route(&self, path: &str) -> Route<'_> {
        self.routes
            .iter()
            .find(|candidate| path.starts_with(candidate.prefix.as_str()))
            .map(Route::Upstream)
            .unwrap_or(Route::Static)
    }
}
