//! Print command: the effective configuration as JSON on stdout.

use crate::cli::{GlobalArgs, PrintArgs};
use crate::commands::utils;
use crate::error::Result;

pub fn execute(global: &GlobalArgs, args: PrintArgs) -> Result<()> {
    let build = utils::load_build(global)?;
    let json = if args.compact {
        serde_json::to_string(&build)?
    } else {
        serde_json::to_string_pretty(&build)?
    };
    println!("{json}");
    Ok(())
}
