//! Parsing registry configuration from YAML.

use crate::config::schema::RegistryConfig;
use crate::error::{RegistryError, Result};

/// Parse a registry configuration from YAML content.
///
/// Missing fields take their defaults, so an empty document is the default
/// configuration.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
pub fn parse_config(content: &str) -> Result<RegistryConfig> {
    if content.trim().is_empty() {
        return Ok(RegistryConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| RegistryError::InvalidConfig {
        message: e.to_string(),
    })
}

impl RegistryConfig {
    /// Parse a configuration from YAML, see [`parse_config`].
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        parse_config(content)
    }
}
