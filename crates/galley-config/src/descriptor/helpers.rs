use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

// Helper defaults
pub(crate) fn default_output_filename() -> String {
    "main.js".to_string()
}

pub(crate) fn default_output_path() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".json".to_string(), ".wasm".to_string()]
}

pub(crate) fn default_modules() -> Vec<String> {
    vec!["node_modules".to_string()]
}

/// Extensions are stored with a leading dot; `json` and `.json` are the same entry.
pub(crate) fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

pub(crate) fn deserialize_extensions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().map(|ext| normalize_extension(ext)).collect())
}
