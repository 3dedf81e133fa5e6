//! Error types for configuration loading, validation and module resolution.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("entry point not found: {entry} (searched from {})", .root.display())]
    EntryNotFound {
        entry: String,
        root: PathBuf,
        /// Candidate paths the resolver probed, in probe order.
        tried: Vec<PathBuf>,
    },

    #[error("output directory is not writable: {} ({reason})", .path.display())]
    OutputNotWritable { path: PathBuf, reason: String },

    #[error("dev server content base not found: {}", .path.display())]
    ContentBaseNotFound { path: PathBuf },

    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error(
        "multiple configuration files found: {}; keep exactly one canonical configuration and express environments as profiles",
        display_paths(.candidates)
    )]
    AmbiguousConfig { candidates: Vec<PathBuf> },

    #[error("unsupported configuration format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid config value for '{field}'{}", hint_suffix(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    #[error("profile '{name}' not found (available: {})", display_names(.available))]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    // Schema validation errors (no filesystem checks)
    #[error("no entries specified")]
    NoEntries,

    #[error("schema validation failed: {message}{}", hint_suffix(.hint))]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn schema(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::SchemaValidation {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, hint: impl ToString) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Failure of the `resolve` host read.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("module not found: can't resolve '{specifier}' in '{}'", .context.display())]
    ModuleNotFound {
        specifier: String,
        context: PathBuf,
        /// Every candidate path probed, in probe order.
        tried: Vec<PathBuf>,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_names(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(": {hint}"),
        None => String::new(),
    }
}
