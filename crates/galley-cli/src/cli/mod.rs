//! Command-line interface definition for Galley.
//!
//! # Command Structure
//!
//! - `galley check` - validate the effective configuration against the project
//! - `galley print` - dump the effective configuration as JSON
//! - `galley resolve` - resolve an import specifier
//! - `galley transform` - show the loader chain for a file
//! - `galley route` - show where the dev server sends a request path
//! - `galley plan` - transform plan for every file in the project
//! - `galley dev` - run the development server

mod commands;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{
    CheckArgs, Command, DevArgs, PlanArgs, PrintArgs, ResolveArgs, RouteArgs, TransformArgs,
};

/// Galley - build configuration for a Vue front-end
#[derive(Parser, Debug)]
#[command(
    name = "galley",
    version,
    about = "Inspect, validate and serve a Vue build configuration",
    long_about = "Galley loads one canonical build configuration per environment and answers\n\
                  the three questions a bundler asks of it: how an import resolves, which\n\
                  loaders transform a file, and whether a dev-server request is proxied."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (defaults to the current directory)
    ///
    /// The config file is looked up here and relative paths in it are
    /// resolved against it.
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Configuration profile to apply over the base config
    ///
    /// Profiles are the sanctioned way to describe a second environment.
    #[arg(short, long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Ignore GALLEY_* environment overrides
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command once parsing is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub cwd: PathBuf,
    pub profile: Option<String>,
    pub use_env: bool,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            profile: None,
            use_env: true,
        }
    }
}

impl Cli {
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            cwd: self.cwd.clone().unwrap_or_else(|| PathBuf::from(".")),
            profile: self.profile.clone(),
            use_env: !self.no_env,
        }
    }
}
