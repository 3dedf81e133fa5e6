//! Error handling for the Galley CLI.
//!
//! `CliError` wraps the library errors via `#[from]` and adds the failures
//! only the binary can hit (server, drift, walking the project). `main`
//! converts it to a miette report.

use std::path::PathBuf;

use galley_config::{ConfigError, Drift, ResolveError};
use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating the configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An import specifier could not be resolved
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration disagrees with the file it was compared against
    #[error("{} field(s) differ from {}", .drifts.len(), .against.display())]
    Drift {
        against: PathBuf,
        drifts: Vec<Drift>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Walking the project tree failed
    #[error("Failed to walk project: {0}")]
    Walk(#[from] walkdir::Error),

    /// Development server errors
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::AmbiguousConfig { candidates }) => {
            let listed = candidates
                .iter()
                .map(|path| format!("  - {}", path.display()))
                .collect::<Vec<_>>()
                .join("\n");
            miette::miette!(
                "More than one configuration is active:\n{listed}\n\nHint: Keep one file and move the other environment into [profiles]"
            )
        }
        CliError::Config(ConfigError::EntryNotFound { entry, root, tried }) => {
            let probes = tried
                .iter()
                .map(|path| format!("  - {}", path.display()))
                .collect::<Vec<_>>()
                .join("\n");
            miette::miette!(
                "Entry point not found: '{entry}' (searched from {})\n\nTried:\n{probes}",
                root.display()
            )
        }
        CliError::Config(e) => miette::miette!("Configuration error: {e}"),
        CliError::Resolve(ResolveError::ModuleNotFound {
            specifier,
            context,
            tried,
        }) => {
            let probes = tried
                .iter()
                .map(|path| format!("  - {}", path.display()))
                .collect::<Vec<_>>()
                .join("\n");
            miette::miette!(
                "Module not found: can't resolve '{specifier}' in '{}'\n\nTried:\n{probes}",
                context.display()
            )
        }
        CliError::Drift { against, drifts } => {
            let fields = drifts
                .iter()
                .map(|drift| format!("  - {drift}"))
                .collect::<Vec<_>>()
                .join("\n");
            miette::miette!(
                "Configuration drift against {}:\n{fields}\n\nHint: One canonical configuration per environment; express intentional differences as a profile",
                against.display()
            )
        }
        _ => miette::miette!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_error_counts_fields() {
        let err = CliError::Drift {
            against: PathBuf::from("legacy/galley.toml"),
            drifts: vec![Drift {
                field: "output.path".to_string(),
                left: "static/".to_string(),
                right: "static/js/".to_string(),
            }],
        };
        assert_eq!(err.to_string(), "1 field(s) differ from legacy/galley.toml");

        let report = cli_error_to_miette(err);
        let rendered = format!("{report}");
        assert!(rendered.contains("output.path: static/ != static/js/"));
    }

    #[test]
    fn config_error_converts() {
        let err: CliError = ConfigError::NoEntries.into();
        assert!(matches!(err, CliError::Config(ConfigError::NoEntries)));
        assert!(err.to_string().contains("no entries specified"));
    }

    #[test]
    fn missing_entry_lists_tried_paths() {
        let err: CliError = ConfigError::EntryNotFound {
            entry: "./javascript/index.js".to_string(),
            root: PathBuf::from("/project"),
            tried: vec![
                PathBuf::from("/project/javascript/index.js"),
                PathBuf::from("/project/javascript/index.js.json"),
            ],
        }
        .into();

        let rendered = format!("{}", cli_error_to_miette(err));
        assert!(rendered.contains("'./javascript/index.js'"));
        assert!(rendered.contains("index.js.json"));
    }

    #[test]
    fn module_not_found_lists_probes() {
        let err: CliError = ResolveError::ModuleNotFound {
            specifier: "./missing".to_string(),
            context: PathBuf::from("javascript"),
            tried: vec![PathBuf::from("javascript/missing"), PathBuf::from("javascript/missing.js")],
        }
        .into();

        let rendered = format!("{}", cli_error_to_miette(err));
        assert!(rendered.contains("javascript/missing.js"));
    }
}
