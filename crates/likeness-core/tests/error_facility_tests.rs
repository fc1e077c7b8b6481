//! Error Facility Tests
//!
//! Domain errors convert into `ExError` with stable codes and context.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::Slotted;
use likeness_core::errors::{ExError, ExErrorKind, LikenessError};
use likeness_core::{compare, Comparison, RegistryConfig, TypeRegistry};

#[test]
fn test_unresolved_path_verifiable_by_kind() {
    let err = TypeRegistry::new().resolve("pkg.Missing").unwrap_err();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::UnresolvedPath);
    assert_eq!(ex_err.code(), "ERR_UNRESOLVED_PATH");
    assert_eq!(ex_err.path(), Some("pkg.Missing"));
    assert_eq!(ex_err.op(), Some("resolve"));
}

#[test]
fn test_empty_path_distinct_from_unresolved() {
    let err = TypeRegistry::new().resolve("pkg..Missing").unwrap_err();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidPath);
    assert_ne!(ex_err.kind(), ExErrorKind::UnresolvedPath);
}

#[test]
fn test_introspection_error_keeps_exact_message() {
    let c = Comparison::of::<Slotted>().with("x", 1);
    let err = c.try_eq(&Slotted::default()).unwrap_err();
    let ex_err: ExError = err.clone().into();

    assert_eq!(ex_err.kind(), ExErrorKind::IntrospectionUnsupported);
    assert_eq!(ex_err.message(), err.to_string());
    assert!(ex_err
        .to_string()
        .starts_with("[ERR_INTROSPECTION_UNSUPPORTED] in operation 'reconcile': <Slotted>"));
}

#[test]
fn test_assertion_failure_carries_message() {
    let err = compare(1, 2).unwrap_err();
    assert_eq!(err.assertion_message(), Some("1 != 2"));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::AssertionFailed);
    assert_eq!(ex_err.message(), "1 != 2");
}

#[test]
fn test_config_errors_map_to_invalid_config() {
    let err = RegistryConfig::from_toml_str("aliases = 3").unwrap_err();
    assert!(matches!(err, LikenessError::InvalidConfig { .. }));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.code(), "ERR_INVALID_CONFIG");
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::UnresolvedPath, "ERR_UNRESOLVED_PATH"),
        (ExErrorKind::InvalidPath, "ERR_INVALID_PATH"),
        (ExErrorKind::DuplicateRegistration, "ERR_DUPLICATE_REGISTRATION"),
        (ExErrorKind::IntrospectionUnsupported, "ERR_INTROSPECTION_UNSUPPORTED"),
        (ExErrorKind::AssertionFailed, "ERR_ASSERTION_FAILED"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
        (ExErrorKind::Io, "ERR_IO"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_source_chain() {
    let inner: ExError = LikenessError::Io {
        message: "disk gone".to_string(),
    }
    .into();
    let outer = ExError::new(ExErrorKind::InvalidConfig)
        .with_message("could not load registry config")
        .with_source(inner);

    let source = std::error::Error::source(&outer).expect("should have a source");
    assert!(source.to_string().contains("ERR_IO"));
}
