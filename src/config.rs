//! Load pipeline configuration and validate it before any plan is built

/// Valid JSON configuration is deserialised into a set of structs defined here
pub mod settings;

/// Read a configuration file and validate it against the embedded schema
pub mod read;

/// Compile the embedded JSON schema
pub mod schema;

pub use read::{load_config, ConfigError};
pub use settings::{Bundle, Config, Gatk, Resources};
