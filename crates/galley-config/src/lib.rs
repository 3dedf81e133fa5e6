pub mod config;
pub mod descriptor;
pub mod dev;
pub mod discovery;
pub mod drift;
pub mod error;
pub mod proxy;
pub mod resolve;
pub mod transform;
pub mod validation;

// Re-export main types
pub use config::*;
pub use descriptor::*;
pub use dev::*;
pub use error::*;

// Re-export the host reads and their helpers
pub use discovery::{CONFIG_FILE_NAMES, ConfigDiscovery, ENV_PREFIX, load_file};
pub use drift::{Drift, compare};
pub use proxy::{ProxyRoute, ProxyTable, Route};
pub use resolve::Resolver;
pub use transform::{TransformPlan, plan};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
