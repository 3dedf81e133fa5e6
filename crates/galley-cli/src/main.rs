//! Galley CLI entry point: argument parsing, logging setup and command dispatch.

use clap::Parser;
use galley_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let global = args.global();
    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(&global, check_args),
        cli::Command::Print(print_args) => commands::print_execute(&global, print_args),
        cli::Command::Resolve(resolve_args) => commands::resolve_execute(&global, resolve_args),
        cli::Command::Transform(transform_args) => {
            commands::transform_execute(&global, transform_args)
        }
        cli::Command::Route(route_args) => commands::route_execute(&global, route_args),
        cli::Command::Plan(plan_args) => commands::plan_execute(&global, plan_args),
        cli::Command::Dev(dev_args) => commands::dev_execute(&global, dev_args).await,
    };

    // Convert CLI errors to miette diagnostics for error reporting
    result.map_err(error::cli_error_to_miette)
}
