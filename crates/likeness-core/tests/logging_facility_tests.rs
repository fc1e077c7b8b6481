//! Logging Facility Tests
//!
//! Registration, resolution and reconciliation emit start/end/error events
//! carrying the canonical schema fields.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{name_of, AClass, Slotted};
use likeness_core::errors::LikenessError;
use likeness_core::logging_facility::test_capture::init_test_capture;
use likeness_core::{log_op_end, log_op_error, log_op_start, Comparison, TypeRegistry};
use likeness_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DISCREPANCY_COUNT, FIELD_TYPE_NAME,
    OP_RECONCILE, OP_REGISTER, OP_RESOLVE,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert_eq!(start_events, 1, "Should have captured one start event");
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_where(op_name, "event", EVENT_END);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = LikenessError::UnresolvedPath {
        path: "pkg.Missing".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_where(op_name, "event", EVENT_END_ERROR);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].field("err.code"), Some("ERR_UNRESOLVED_PATH"));
    assert_eq!(events[0].field("err.kind"), Some("UnresolvedPath"));
}

#[test]
fn test_log_macros_with_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, type_name = "pkg::AClass", strict = false);

    let events = capture.events_where(op_name, "event", EVENT_START);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("type_name"), Some("pkg::AClass"));
    assert_eq!(events[0].field("strict"), Some("false"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_unknown_op() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_reconcile_logs_start_and_end_with_discrepancy_count() {
    let capture = init_test_capture();

    // Unique type so events from other tests cannot match
    struct ReconcileProbe;
    impl std::fmt::Debug for ReconcileProbe {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("<ReconcileProbe>")
        }
    }
    likeness_core::introspect!(ReconcileProbe {});

    let c = Comparison::of::<ReconcileProbe>().with("x", 1);
    assert!(c != ReconcileProbe);

    let type_name = name_of::<ReconcileProbe>();
    let starts = capture.events_where(OP_RECONCILE, FIELD_TYPE_NAME, type_name);
    assert!(starts
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_START) && e.field("attribute_count") == Some("1")));

    let end = starts
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .expect("Should have an end event");
    assert_eq!(end.field(FIELD_DISCREPANCY_COUNT), Some("1"));
}

#[test]
fn test_reconcile_logs_error_on_fatal_failure() {
    let capture = init_test_capture();

    let c = Comparison::of::<Slotted>().with("x", 1);
    assert!(c.try_eq(&Slotted::default()).is_err());

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_RECONCILE)
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_INTROSPECTION_UNSUPPORTED")
    });
    assert!(errors >= 1);
}

#[test]
fn test_registry_logs_registration_and_resolution() {
    let capture = init_test_capture();

    let mut registry = TypeRegistry::new();
    registry
        .register_as::<AClass>("logging_probe.unique.AClass")
        .unwrap();
    assert!(registry.resolve("logging_probe.unique.Missing").is_err());

    let registered = capture.events_where(OP_REGISTER, "path", "logging_probe.unique.AClass");
    assert!(registered
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_END)));

    let resolved = capture.events_where(OP_RESOLVE, "path", "logging_probe.unique.Missing");
    assert!(resolved.iter().any(|e| e.event.as_deref() == Some(EVENT_START)));
    assert!(capture.count_events(|e| {
        e.op.as_deref() == Some(OP_RESOLVE)
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_UNRESOLVED_PATH")
    }) >= 1);
}
