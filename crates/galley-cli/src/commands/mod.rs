//! Command implementations for the Galley CLI.
//!
//! Each command lives in its own module and exposes an `execute` function
//! taking the shared [`GlobalArgs`](crate::cli::GlobalArgs) and its own
//! parsed arguments. Results go to stdout, status lines to stderr.

pub mod check;
pub mod dev;
pub mod plan;
pub mod print;
pub mod resolve;
pub mod route;
pub mod transform;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use dev::execute as dev_execute;
pub use plan::execute as plan_execute;
pub use print::execute as print_execute;
pub use resolve::execute as resolve_execute;
pub use route::execute as route_execute;
pub use transform::execute as transform_execute;
