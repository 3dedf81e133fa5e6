//! The `transform` host read: which loader chain a file goes through.

use std::fmt;
use std::path::Path;

use crate::descriptor::{LoaderUse, Rule};

/// Outcome of matching a file against the module rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformPlan<'a> {
    /// The first matching rule; its chain is applied as declared.
    Chain { index: usize, rule: &'a Rule },
    /// No rule matched; the file is emitted verbatim.
    Copy,
}

impl<'a> TransformPlan<'a> {
    pub fn loaders(&self) -> &'a [LoaderUse] {
        match self {
            TransformPlan::Chain { rule, .. } => &rule.uses,
            TransformPlan::Copy => &[],
        }
    }

    pub fn is_copy(&self) -> bool {
        matches!(self, TransformPlan::Copy)
    }
}

impl fmt::Display for TransformPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformPlan::Chain { index, rule } => {
                let chain = rule
                    .uses
                    .iter()
                    .map(|u| u.loader.as_str())
                    .collect::<Vec<_>>()
                    .join(" ! ");
                write!(f, "rule #{index} {} -> {chain}", rule.test)
            }
            TransformPlan::Copy => f.write_str("copy"),
        }
    }
}

/// Match `file` against `rules` in declaration order. Rules are never merged.
pub fn plan<'a>(rules: &'a [Rule], file: &Path) -> TransformPlan<'a> {
    let path = normalize(file);
    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(&path))
        .map(|(index, rule)| TransformPlan::Chain { index, rule })
        .unwrap_or(TransformPlan::Copy)
}

/// Patterns are written against `/`-separated paths on every platform.
fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
