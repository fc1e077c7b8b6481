//! Reconciliation engine.
//!
//! The entry point is [`reconcile`], which checks the other value's type and
//! then walks the union (strict) or the declared subset (loose) of attribute
//! names in lexicographic order.

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::Utc;
use likeness_core_types::schema::OP_RECONCILE;

use crate::errors::Result;
use crate::introspect::{self, Introspect};
use crate::model::{AttributeMap, Attributes, TypeSpec, Value};
use crate::reconcile::model::{ComparisonOutcome, Discrepancy};
use crate::{log_op_end, log_op_error, log_op_start};

/// Reconcile `actual` against an expected type and optional attribute mapping
///
/// `expected = None` is a type-only check. The returned outcome has
/// `generation` 0; a [`Comparison`](crate::Comparison) stamps its own
/// generation when it records the outcome.
///
/// # Errors
///
/// - `IntrospectionUnsupported` when `strict` is set and `actual` exposes no
///   attribute mapping, or when a nested Comparison hits the same condition
pub fn reconcile(
    expected_type: &TypeSpec,
    expected: Option<&AttributeMap>,
    actual: &dyn Introspect,
    strict: bool,
) -> Result<ComparisonOutcome> {
    let start = Instant::now();
    log_op_start!(
        OP_RECONCILE,
        type_name = %expected_type,
        strict = strict,
        attribute_count = expected.map_or(0, AttributeMap::len)
    );

    match reconcile_inner(expected_type, expected, actual, strict) {
        Ok(discrepancies) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            log_op_end!(
                OP_RECONCILE,
                duration_ms = duration_ms,
                type_name = %expected_type,
                discrepancy_count = discrepancies.len()
            );
            Ok(ComparisonOutcome {
                expected_type: expected_type.clone(),
                other_repr: actual.repr(),
                discrepancies,
                generation: 0,
                compared_at: Utc::now(),
            })
        }
        Err(err) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            log_op_error!(OP_RECONCILE, err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}

fn reconcile_inner(
    expected_type: &TypeSpec,
    expected: Option<&AttributeMap>,
    actual: &dyn Introspect,
    strict: bool,
) -> Result<Vec<Discrepancy>> {
    let actual_type = actual.runtime_type();
    if actual_type != *expected_type {
        return Ok(vec![Discrepancy::WrongType {
            expected: expected_type.clone(),
            actual: actual_type,
        }]);
    }

    let Some(expected) = expected else {
        return Ok(Vec::new());
    };

    let extracted = introspect::extract(actual, strict)?;

    let mut names: BTreeSet<String> = expected.names().map(str::to_string).collect();
    if strict {
        if let Attributes::Map(map) = &extracted {
            names.extend(map.names().map(str::to_string));
        }
    }

    let mut discrepancies = Vec::new();
    for name in names {
        let expected_value = expected.get(&name);
        let actual_value = introspect::lookup(actual, &extracted, &name);

        match (expected_value, actual_value) {
            (Some(expected), None) => discrepancies.push(Discrepancy::MissingOnOther {
                name,
                expected: expected.clone(),
            }),
            (None, Some(actual)) => {
                if strict {
                    discrepancies.push(Discrepancy::MissingOnExpected { name, actual });
                }
            }
            (Some(expected), Some(actual)) => {
                if let Some(mismatch) = compare_attribute(name, expected, actual)? {
                    discrepancies.push(mismatch);
                }
            }
            (None, None) => {}
        }
    }

    Ok(discrepancies)
}

fn compare_attribute(name: String, expected: &Value, actual: Value) -> Result<Option<Discrepancy>> {
    if let Value::Comparison(nested) = expected {
        if nested.try_eq(&actual)? {
            return Ok(None);
        }
        return Ok(Some(Discrepancy::ValueMismatch {
            name,
            expected: expected.clone(),
            actual,
            nested: nested.last_outcome().map(Box::new),
        }));
    }

    if expected.try_eq(&actual)? {
        return Ok(None);
    }
    Ok(Some(Discrepancy::ValueMismatch {
        name,
        expected: expected.clone(),
        actual,
        nested: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LikenessError;
    use crate::reconcile::model::DiscrepancyKind;

    #[derive(Debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    crate::introspect!(Point { x, y });

    #[derive(Debug)]
    struct Opaque;

    impl Introspect for Opaque {
        fn runtime_type(&self) -> TypeSpec {
            TypeSpec::of::<Opaque>()
        }

        fn attribute(&self, name: &str) -> Option<Value> {
            (name == "x").then(|| Value::Int(1))
        }
    }

    fn kinds(outcome: &ComparisonOutcome) -> Vec<(DiscrepancyKind, Option<String>)> {
        outcome
            .discrepancies
            .iter()
            .map(|d| (d.kind(), d.name().map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_type_mismatch_suppresses_attribute_checks() {
        let expected = AttributeMap::new().with("x", 99).with("nope", 1);
        let outcome = reconcile(
            &TypeSpec::of::<Opaque>(),
            Some(&expected),
            &Point { x: 1, y: 2 },
            true,
        )
        .unwrap();

        assert_eq!(kinds(&outcome), vec![(DiscrepancyKind::WrongType, None)]);
    }

    #[test]
    fn test_type_only_check_passes_without_attributes() {
        let outcome = reconcile(&TypeSpec::of::<Point>(), None, &Point { x: 1, y: 2 }, true).unwrap();
        assert!(outcome.passed());
        assert_eq!(outcome.other_repr, "Point { x: 1, y: 2 }");
    }

    #[test]
    fn test_strict_reports_every_reason_in_name_order() {
        let expected = AttributeMap::new().with("z", "missing").with("y", 5);
        let outcome = reconcile(
            &TypeSpec::of::<Point>(),
            Some(&expected),
            &Point { x: 1, y: 2 },
            true,
        )
        .unwrap();

        assert_eq!(
            kinds(&outcome),
            vec![
                (DiscrepancyKind::MissingOnExpected, Some("x".to_string())),
                (DiscrepancyKind::ValueMismatch, Some("y".to_string())),
                (DiscrepancyKind::MissingOnOther, Some("z".to_string())),
            ]
        );
    }

    #[test]
    fn test_loose_ignores_extra_attributes() {
        let expected = AttributeMap::new().with("y", 2);
        let outcome = reconcile(
            &TypeSpec::of::<Point>(),
            Some(&expected),
            &Point { x: 1, y: 2 },
            false,
        )
        .unwrap();
        assert!(outcome.passed());
    }

    #[test]
    fn test_unsupported_is_fatal_only_when_strict() {
        let expected = AttributeMap::new().with("x", 1);

        let err = reconcile(&TypeSpec::of::<Opaque>(), Some(&expected), &Opaque, true).unwrap_err();
        assert!(matches!(err, LikenessError::IntrospectionUnsupported { .. }));

        let outcome = reconcile(&TypeSpec::of::<Opaque>(), Some(&expected), &Opaque, false).unwrap();
        assert!(outcome.passed());
    }
}
