//! Logging infrastructure for the Galley CLI.
//!
//! Structured logging on the `tracing` ecosystem. `--verbose` turns on debug
//! output for the galley crates, `--quiet` limits it to errors, and otherwise
//! `RUST_LOG` is honored with an info-level fallback.
//!
//! # Example
//!
//! ```rust,no_run
//! use galley_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("loading config");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "galley=debug,galley_config=debug,galley_cli=debug";
const QUIET_FILTER: &str = "galley=error,galley_config=error,galley_cli=error";
const DEFAULT_FILTER: &str = "galley=info,galley_config=info,galley_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program, before any logging occurs.
///
/// The level is chosen in this order:
/// 1. `--verbose`: DEBUG for galley crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG` environment variable
/// 4. INFO for galley crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = filter_for(verbose, quiet);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A second init (e.g. from a doctest) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_environment() {
        let filter = filter_for(true, false);
        assert!(filter.to_string().contains("galley_config=debug"));
    }

    #[test]
    fn quiet_limits_to_errors() {
        let filter = filter_for(false, true);
        assert!(filter.to_string().contains("galley_cli=error"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
