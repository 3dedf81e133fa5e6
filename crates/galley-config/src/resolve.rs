//! The `resolve` host read: import specifier → file on disk.
//!
//! Aliases are applied first. A specifier that hits an alias is only ever
//! searched as its alias target; it never falls through to an extension
//! search of the original spelling.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::{debug, trace};

use crate::descriptor::ResolveConfig;
use crate::error::ResolveError;

pub struct Resolver<'a> {
    config: &'a ResolveConfig,
    root: PathBuf,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ResolveConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Substitute the first matching alias, in declaration order.
    ///
    /// `key$` matches only `key`; `key` matches `key` and `key/rest`.
    pub fn apply_alias(&self, specifier: &str) -> Option<String> {
        for (key, target) in &self.config.alias {
            if let Some(exact) = key.strip_suffix('$') {
                if specifier == exact {
                    return Some(target.clone());
                }
                continue;
            }

            if specifier == key {
                return Some(target.clone());
            }
            if let Some(rest) = specifier
                .strip_prefix(key.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                return Some(format!("{}/{}", target.trim_end_matches('/'), rest));
            }
        }
        None
    }

    /// Resolve `specifier` as imported from a module in `context` (a directory).
    pub fn resolve(&self, specifier: &str, context: &Path) -> Result<PathBuf, ResolveError> {
        let aliased = self.apply_alias(specifier);
        if let Some(target) = &aliased {
            debug!(specifier, target = %target, "alias hit");
        }

        let request = aliased.as_deref().unwrap_or(specifier);
        // Relative alias targets are written relative to the project root.
        let base_dir = if aliased.is_some() { self.root.as_path() } else { context };

        let mut tried = Vec::new();
        for candidate in self.bases(request, base_dir) {
            if let Some(found) = self.probe(&candidate, &mut tried) {
                debug!(specifier, resolved = %found.display(), "resolved");
                return Ok(found.clean());
            }
        }

        Err(ResolveError::ModuleNotFound {
            specifier: specifier.to_string(),
            context: context.to_path_buf(),
            tried,
        })
    }

    fn bases(&self, request: &str, base_dir: &Path) -> Vec<PathBuf> {
        if is_relative(request) {
            return vec![base_dir.join(request)];
        }
        if Path::new(request).is_absolute() {
            return vec![PathBuf::from(request)];
        }

        self.config
            .modules
            .iter()
            .map(|dir| {
                let dir = Path::new(dir);
                let dir = if dir.is_absolute() {
                    dir.to_path_buf()
                } else {
                    self.root.join(dir)
                };
                dir.join(request)
            })
            .collect()
    }

    /// Try `base` as a file, then with each extension, then as a directory index.
    fn probe(&self, base: &Path, tried: &mut Vec<PathBuf>) -> Option<PathBuf> {
        let mut check = |candidate: PathBuf| {
            trace!(candidate = %candidate.display(), "probing");
            let hit = candidate.is_file();
            tried.push(candidate.clone());
            hit.then_some(candidate)
        };

        if let Some(found) = check(base.to_path_buf()) {
            return Some(found);
        }

        for ext in &self.config.extensions {
            if let Some(found) = check(with_suffix(base, ext)) {
                return Some(found);
            }
        }

        if base.is_dir() {
            for ext in &self.config.extensions {
                if let Some(found) = check(base.join(format!("index{ext}"))) {
                    return Some(found);
                }
            }
        }

        None
    }
}

fn is_relative(request: &str) -> bool {
    request == "."
        || request == ".."
        || request.starts_with("./")
        || request.starts_with("../")
}

/// Append `suffix` to the file name (`app` + `.vue` → `app.vue`, `a.b` + `.js` → `a.b.js`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}
