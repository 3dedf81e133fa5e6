//! Plan command: the transform plan for every file in the project.
//!
//! Walks the tree in file-name order, skipping `node_modules`, `.git` and
//! the build output directory.

use std::path::{Path, PathBuf};

use galley_config::BuildConfig;
use walkdir::{DirEntry, WalkDir};

use crate::cli::{GlobalArgs, PlanArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

const SKIPPED_DIRS: [&str; 2] = ["node_modules", ".git"];

pub fn execute(global: &GlobalArgs, args: PlanArgs) -> Result<()> {
    let build = utils::load_build(global)?;
    let start = match &args.dir {
        Some(dir) => utils::resolve_path(dir, &global.cwd),
        None => global.cwd.clone(),
    };

    let lines = plan_lines(&build, &global.cwd, &start, args.transformed_only)?;
    for line in &lines {
        println!("{line}");
    }
    ui::info(&format!("{} file(s)", lines.len()));
    Ok(())
}

fn plan_lines(
    build: &BuildConfig,
    root: &Path,
    start: &Path,
    transformed_only: bool,
) -> Result<Vec<String>> {
    let out_dir = build.output.dir_in(root);
    let mut lines = Vec::new();

    let walker = WalkDir::new(start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry, root, &out_dir));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = relative_to(entry.path(), root);
        let plan = build.transform(&relative);
        if transformed_only && plan.is_copy() {
            continue;
        }
        lines.push(format!("{}\t{plan}", relative.display()));
    }

    Ok(lines)
}

fn is_skipped(entry: &DirEntry, root: &Path, out_dir: &Path) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    SKIPPED_DIRS.contains(&name.as_ref()) || (out_dir != root && entry.path() == out_dir)
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
