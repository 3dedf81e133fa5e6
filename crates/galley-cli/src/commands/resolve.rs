//! Resolve command: where an import specifier lands on disk.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::{GlobalArgs, ResolveArgs};
use crate::commands::utils;
use crate::error::Result;

pub fn execute(global: &GlobalArgs, args: ResolveArgs) -> Result<()> {
    let build = utils::load_build(global)?;
    let context = context_dir(global, args.from);
    debug!(specifier = %args.specifier, context = %context.display(), "resolving");

    let resolved = build.resolver(&global.cwd).resolve(&args.specifier, &context)?;
    println!("{}", resolved.display());
    Ok(())
}

/// Directory relative specifiers resolve from: the importer's parent, or the root.
fn context_dir(global: &GlobalArgs, from: Option<PathBuf>) -> PathBuf {
    match from {
        Some(importer) => {
            let importer = utils::resolve_path(&importer, &global.cwd);
            importer
                .parent()
                .map(|dir| dir.to_path_buf())
                .unwrap_or_else(|| global.cwd.clone())
        }
        None => global.cwd.clone(),
    }
}
