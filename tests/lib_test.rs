//! Library integration tests.

use selective_factory::RegistryError;

#[test]
fn error_types_are_public() {
    let err = RegistryError::InvalidConfig {
        message: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> selective_factory::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn registry_types_are_public() {
    use selective_factory::{EntryKey, Registration, Registry};

    fn any(_: &u8) -> bool {
        true
    }
    fn build(input: (u8,)) -> u16 {
        u16::from(input.0) + 1
    }

    let mut registry: Registry<u8, (u8,), u16> = Registry::new();
    assert_eq!(registry.register(any, build), Registration::Inserted);
    assert_eq!(registry.produce_all(&0, (41,)), vec![42]);
    assert_eq!(
        registry.iter().map(|e| e.key().clone()).collect::<Vec<_>>(),
        vec![EntryKey::Anonymous(0)]
    );
}

#[test]
fn config_types_are_public() {
    use selective_factory::{DuplicatePolicy, RegistryConfig};

    let config = RegistryConfig::with_duplicates(DuplicatePolicy::Reject);
    assert_eq!(config.duplicates, DuplicatePolicy::Reject);
}
