//! Error types for registry operations.
//!
//! This module defines [`RegistryError`], the error type returned by the
//! handful of registry operations that can refuse a request, and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Production never fails on its own account: "no match" is `None` or an
//!   empty `Vec`, not an error
//! - Constructor failures belong to the constructor's own error type and are
//!   passed through untouched (see [`Registry::try_produce_all`])
//!
//! [`Registry::try_produce_all`]: crate::registry::Registry::try_produce_all

use thiserror::Error;

/// Core error type for registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An entry with this name is already registered in this table.
    #[error("Constructor '{name}' is already registered")]
    DuplicateName { name: String },

    /// Registry configuration could not be parsed.
    #[error("Invalid registry configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_displays_name() {
        let err = RegistryError::DuplicateName {
            name: "plugins::is_http => make_http".into(),
        };
        assert_eq!(
            err.to_string(),
            "Constructor 'plugins::is_http => make_http' is already registered"
        );
    }

    #[test]
    fn invalid_config_displays_message() {
        let err = RegistryError::InvalidConfig {
            message: "unknown variant `sometimes`".into(),
        };
        assert!(err.to_string().contains("unknown variant `sometimes`"));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(RegistryError::InvalidConfig {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
