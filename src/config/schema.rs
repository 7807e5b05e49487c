//! Configuration schema definitions for registry tables.
//!
//! These structs map to the YAML form accepted by
//! [`parse_config`](super::parse_config).

use serde::{Deserialize, Serialize};

/// What a table does when a name that is already present is registered
/// again.
///
/// Only named registrations can collide. Unnamed ones always add an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the entry registered first and drop the newcomer with a warning.
    #[default]
    KeepFirst,
    /// Swap in the newcomer's pair, keeping the entry's table position.
    Replace,
    /// Keep the first entry and report the newcomer as rejected.
    Reject,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::KeepFirst => write!(f, "keep_first"),
            DuplicatePolicy::Replace => write!(f, "replace"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Behaviour settings for a single registry table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Collision handling for repeated names
    pub duplicates: DuplicatePolicy,
}

impl RegistryConfig {
    /// Config with the given duplicate policy.
    pub fn with_duplicates(duplicates: DuplicatePolicy) -> Self {
        Self { duplicates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_keeps_first() {
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::KeepFirst);
        assert_eq!(
            RegistryConfig::default().duplicates,
            DuplicatePolicy::KeepFirst
        );
    }

    #[test]
    fn policy_display_matches_serde_names() {
        for policy in [
            DuplicatePolicy::KeepFirst,
            DuplicatePolicy::Replace,
            DuplicatePolicy::Reject,
        ] {
            let yaml = serde_yaml::to_string(&policy).unwrap();
            assert_eq!(yaml.trim(), policy.to_string());
        }
    }

    #[test]
    fn with_duplicates_sets_policy() {
        let config = RegistryConfig::with_duplicates(DuplicatePolicy::Reject);
        assert_eq!(config.duplicates, DuplicatePolicy::Reject);
    }
}
