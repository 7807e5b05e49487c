//! Configuration for registry tables.
//!
//! - Schema definitions in [`schema`]
//! - YAML parsing in [`loader`]
//!
//! # Example
//!
//! ```
//! use selective_factory::config::{DuplicatePolicy, RegistryConfig};
//!
//! let config = RegistryConfig::from_yaml_str("duplicates: replace").unwrap();
//! assert_eq!(config.duplicates, DuplicatePolicy::Replace);
//! ```

pub mod loader;
pub mod schema;

pub use loader::parse_config;
pub use schema::{DuplicatePolicy, RegistryConfig};
