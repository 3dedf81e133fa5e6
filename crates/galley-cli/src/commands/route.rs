//! Route command: is a request path proxied, and to where?

use galley_config::{ProxyTable, Route};

use crate::cli::{GlobalArgs, RouteArgs};
use crate::commands::utils;
use crate::error::{CliError, Result};

pub fn execute(global: &GlobalArgs, args: RouteArgs) -> Result<()> {
    let build = utils::load_build(global)?;
    println!("{}", describe(&build.proxy_table(), &args.path)?);
    Ok(())
}

/// The upstream URL for `request`, or `static`.
fn describe(table: &ProxyTable, request: &str) -> Result<String> {
    if !request.starts_with('/') {
        return Err(CliError::InvalidArgument(format!(
            "request path must start with '/': {request}"
        )));
    }

    let path = request.split_once('?').map_or(request, |(path, _)| path);
    Ok(match table.route(path) {
        Route::Upstream(route) => route.upstream_url(request),
        Route::Static => "static".to_string(),
    })
}
