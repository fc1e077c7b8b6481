//! Reconciliation output types.
//!
//! A [`ComparisonOutcome`] holds live [`Value`]s so it can be rendered with the
//! values' own textual forms. [`OutcomeSummary`] is its serde projection, used
//! for structured log output and anywhere a plain-data view is needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{TypeSpec, Value};

/// One recorded mismatch reason within a comparison outcome
#[derive(Debug, Clone)]
pub enum Discrepancy {
    /// The other value is not an instance of the expected type
    WrongType { expected: TypeSpec, actual: TypeSpec },
    /// Declared on the Comparison, absent from the other value
    MissingOnOther { name: String, expected: Value },
    /// Present on the other value, not declared on the Comparison (strict only)
    MissingOnExpected { name: String, actual: Value },
    /// Present on both sides with unequal values
    ///
    /// `nested` carries the outcome of a nested Comparison used as the
    /// expected value, as it stood right after this reconciliation.
    ValueMismatch {
        name: String,
        expected: Value,
        actual: Value,
        nested: Option<Box<ComparisonOutcome>>,
    },
}

impl Discrepancy {
    pub fn kind(&self) -> DiscrepancyKind {
        match self {
            Discrepancy::WrongType { .. } => DiscrepancyKind::WrongType,
            Discrepancy::MissingOnOther { .. } => DiscrepancyKind::MissingOnOther,
            Discrepancy::MissingOnExpected { .. } => DiscrepancyKind::MissingOnExpected,
            Discrepancy::ValueMismatch { .. } => DiscrepancyKind::ValueMismatch,
        }
    }

    /// Attribute name, `None` for a type mismatch
    pub fn name(&self) -> Option<&str> {
        match self {
            Discrepancy::WrongType { .. } => None,
            Discrepancy::MissingOnOther { name, .. }
            | Discrepancy::MissingOnExpected { name, .. }
            | Discrepancy::ValueMismatch { name, .. } => Some(name),
        }
    }

    fn summary(&self) -> DiscrepancySummary {
        let (expected, actual) = match self {
            Discrepancy::WrongType { expected, actual } => {
                (Some(expected.to_string()), Some(actual.to_string()))
            }
            Discrepancy::MissingOnOther { expected, .. } => (Some(expected.to_string()), None),
            Discrepancy::MissingOnExpected { actual, .. } => (None, Some(actual.to_string())),
            Discrepancy::ValueMismatch {
                expected, actual, ..
            } => (Some(expected.to_string()), Some(actual.to_string())),
        };
        DiscrepancySummary {
            kind: self.kind(),
            name: self.name().map(str::to_string),
            expected,
            actual,
        }
    }
}

/// Stable classification of a [`Discrepancy`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    WrongType,
    MissingOnOther,
    MissingOnExpected,
    ValueMismatch,
}

impl DiscrepancyKind {
    pub fn code(&self) -> &'static str {
        match self {
            DiscrepancyKind::WrongType => "wrong_type",
            DiscrepancyKind::MissingOnOther => "missing_on_other",
            DiscrepancyKind::MissingOnExpected => "missing_on_expected",
            DiscrepancyKind::ValueMismatch => "value_mismatch",
        }
    }
}

/// Result of the most recent reconciliation performed by a Comparison
///
/// An empty discrepancy list means the comparison passed.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    /// The type the Comparison expected
    pub expected_type: TypeSpec,
    /// Textual form of the value compared against
    pub other_repr: String,
    /// Type-level discrepancy alone, or attribute-level ones in name order
    pub discrepancies: Vec<Discrepancy>,
    /// Position of this outcome in its Comparison's history, starting at 1
    pub generation: u64,
    pub compared_at: DateTime<Utc>,
}

impl ComparisonOutcome {
    pub fn passed(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// True when the outcome is a lone type mismatch
    pub fn is_wrong_type(&self) -> bool {
        matches!(self.discrepancies.as_slice(), [Discrepancy::WrongType { .. }])
    }

    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary {
            expected_type: self.expected_type.to_string(),
            other: self.other_repr.clone(),
            passed: self.passed(),
            generation: self.generation,
            compared_at: self.compared_at,
            discrepancies: self.discrepancies.iter().map(Discrepancy::summary).collect(),
        }
    }
}

/// Plain-data projection of a [`ComparisonOutcome`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutcomeSummary {
    pub expected_type: String,
    pub other: String,
    pub passed: bool,
    pub generation: u64,
    pub compared_at: DateTime<Utc>,
    pub discrepancies: Vec<DiscrepancySummary>,
}

impl OutcomeSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Plain-data projection of a [`Discrepancy`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscrepancySummary {
    pub kind: DiscrepancyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(discrepancies: Vec<Discrepancy>) -> ComparisonOutcome {
        ComparisonOutcome {
            expected_type: TypeSpec::of::<i64>(),
            other_repr: "2".to_string(),
            discrepancies,
            generation: 1,
            compared_at: Utc::now(),
        }
    }

    #[test]
    fn test_kind_codes_match_serde_names() {
        for kind in [
            DiscrepancyKind::WrongType,
            DiscrepancyKind::MissingOnOther,
            DiscrepancyKind::MissingOnExpected,
            DiscrepancyKind::ValueMismatch,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn test_wrong_type_detection() {
        let wrong = outcome(vec![Discrepancy::WrongType {
            expected: TypeSpec::of::<i64>(),
            actual: TypeSpec::of::<String>(),
        }]);
        assert!(wrong.is_wrong_type());
        assert!(!wrong.passed());

        let attr = outcome(vec![Discrepancy::MissingOnOther {
            name: "x".to_string(),
            expected: Value::Int(1),
        }]);
        assert!(!attr.is_wrong_type());
        assert!(outcome(vec![]).passed());
    }

    #[test]
    fn test_summary_serializes_without_empty_fields() {
        let summary = outcome(vec![Discrepancy::MissingOnExpected {
            name: "z".to_string(),
            actual: Value::from("extra"),
        }])
        .summary();

        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        let entry = &json["discrepancies"][0];
        assert_eq!(entry["kind"], "missing_on_expected");
        assert_eq!(entry["name"], "z");
        assert_eq!(entry["actual"], "\"extra\"");
        assert!(entry.get("expected").is_none());
        assert_eq!(json["passed"], false);
    }
}
