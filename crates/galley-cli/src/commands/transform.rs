//! Transform command: which rule and loader chain a file gets.

use crate::cli::{GlobalArgs, TransformArgs};
use crate::commands::utils;
use crate::error::Result;

pub fn execute(global: &GlobalArgs, args: TransformArgs) -> Result<()> {
    let build = utils::load_build(global)?;
    println!("{}", build.transform(&args.file));
    Ok(())
}
