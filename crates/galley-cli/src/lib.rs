//! Galley CLI - inspect, validate and serve a Vue build configuration.
//!
//! The binary is a thin consumer of [`galley_config`]: every command loads
//! the effective descriptor once, then asks it one of its three questions
//! (resolve, transform, proxy) or serves it.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - one module per subcommand, each exposing `execute`
//! - [`dev`] - the development server (static files plus upstream proxy)
//! - [`error`] - `CliError` and its miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - colored status lines on stderr
//!
//! # Example
//!
//! ```rust
//! use galley_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
