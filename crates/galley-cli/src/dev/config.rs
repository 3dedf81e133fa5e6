//! Development server configuration.
//!
//! The descriptor's `dev_server` block with CLI overrides applied and the
//! bind address resolved.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use galley_config::{BuildConfig, ConfigError, DEFAULT_PORT};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevConfig {
    /// Server socket address (IP + port)
    pub addr: SocketAddr,

    /// Absolute or root-relative directory static files are served from
    pub content_base: PathBuf,
}

impl DevConfig {
    /// Combine the descriptor with `--port` / `--host`.
    ///
    /// Precedence: CLI flag, then `dev_server` in the config, then defaults.
    pub fn from_build(
        build: &BuildConfig,
        root: &Path,
        port: Option<u16>,
        host: Option<&str>,
    ) -> Result<Self> {
        let dev = build.dev_server.clone().unwrap_or_default();
        let host = host.unwrap_or(&dev.host);
        let port = port.or(dev.port).unwrap_or(DEFAULT_PORT);

        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|e| CliError::InvalidArgument(format!("invalid host '{host}': {e}")))?
            .next()
            .ok_or_else(|| CliError::InvalidArgument(format!("host '{host}' has no address")))?;

        let content_base = if dev.content_base.is_absolute() {
            dev.content_base
        } else {
            root.join(&dev.content_base)
        };

        Ok(Self { addr, content_base })
    }

    /// The content base must exist before the server starts.
    pub fn validate(&self) -> Result<()> {
        if !self.content_base.is_dir() {
            return Err(ConfigError::ContentBaseNotFound {
                path: self.content_base.clone(),
            }
            .into());
        }
        Ok(())
    }

    pub fn server_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_the_descriptor() {
        let config =
            DevConfig::from_build(&BuildConfig::vue_default(), Path::new("project"), None, None)
                .unwrap();
        assert_eq!(config.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.content_base, PathBuf::from("project/static"));
        assert_eq!(config.server_url(), "http://127.0.0.1:3000");
    }

    #[test]
    fn cli_flags_override_the_descriptor() {
        let mut build = BuildConfig::vue_default();
        if let Some(dev) = build.dev_server.as_mut() {
            dev.port = Some(8000);
        }

        let from_config = DevConfig::from_build(&build, Path::new("."), None, None).unwrap();
        assert_eq!(from_config.addr.port(), 8000);

        let from_flag =
            DevConfig::from_build(&build, Path::new("."), Some(4000), Some("0.0.0.0")).unwrap();
        assert_eq!(from_flag.addr, "0.0.0.0:4000".parse().unwrap());
    }

    #[test]
    fn missing_content_base_fails_validation() {
        let dir = tempfile::TempDir::new().unwrap();
        let config =
            DevConfig::from_build(&BuildConfig::vue_default(), dir.path(), None, None).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CliError::Config(ConfigError::ContentBaseNotFound { .. }))
        ));
    }
}
