//! Development server.
//!
//! Requests whose path starts with a configured proxy prefix are forwarded
//! to the upstream origin; everything else is served from the content base.

pub mod config;
pub mod proxy;
pub mod server;

pub use config::DevConfig;
pub use proxy::ProxyState;
pub use server::DevServer;
