//! Development server command implementation.
//!
//! Loads the effective configuration, checks the content base, then serves
//! until Ctrl+C.

use tracing::info;

use crate::cli::{DevArgs, GlobalArgs};
use crate::commands::utils;
use crate::dev::{DevConfig, DevServer};
use crate::error::Result;
use crate::ui;

pub async fn execute(global: &GlobalArgs, args: DevArgs) -> Result<()> {
    ui::info("Starting development server...");

    let build = utils::load_build(global)?;
    let config = DevConfig::from_build(&build, &global.cwd, args.port, args.host.as_deref())?;
    config.validate()?;

    let table = build.proxy_table();
    for route in table.routes() {
        ui::info(&format!("Proxy {} -> {}", route.prefix, route.target));
    }
    info!(content_base = %config.content_base.display(), "serving static files");

    DevServer::new(config, table)?.start().await
}
