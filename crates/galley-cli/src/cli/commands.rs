use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available Galley subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the configuration against the project on disk
    ///
    /// Checks that entries resolve, the output directory is writable and the
    /// dev-server content base exists. With --against, also compares the
    /// configuration with another file and fails on any difference.
    Check(CheckArgs),

    /// Print the effective configuration as JSON
    Print(PrintArgs),

    /// Resolve an import specifier the way the bundler would
    Resolve(ResolveArgs),

    /// Show which rule and loader chain apply to a file
    Transform(TransformArgs),

    /// Show whether a request path is proxied or served statically
    Route(RouteArgs),

    /// Show the transform plan for every file in the project
    Plan(PlanArgs),

    /// Start the development server
    ///
    /// Serves the content base and forwards proxied path prefixes to their
    /// upstream origin.
    Dev(DevArgs),
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Another config file that must describe the same build
    ///
    /// Every differing field is reported. Any difference fails the check.
    #[arg(long, value_name = "FILE")]
    pub against: Option<PathBuf>,

    /// Profile to apply to the --against file
    #[arg(long, value_name = "NAME", requires = "against")]
    pub against_profile: Option<String>,
}

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// Emit compact JSON on one line
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Import specifier, e.g. `vue` or `./components/App`
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,

    /// File the import appears in; relative specifiers resolve from its directory
    ///
    /// Defaults to the project root.
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,
}

/// Arguments for the transform command
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// File path, relative to the project root
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the route command
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Request path, optionally with a query string
    #[arg(value_name = "PATH")]
    pub path: String,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Directory to walk, relative to the project root
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Only list files that get a loader chain
    #[arg(long)]
    pub transformed_only: bool,
}

/// Arguments for the dev command
#[derive(Args, Debug)]
pub struct DevArgs {
    /// Port to listen on
    ///
    /// Overrides dev_server.port from the config. Defaults to 3000.
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    ///
    /// Overrides dev_server.host from the config.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,
}
