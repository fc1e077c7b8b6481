use std::fmt::Write as _;

use crate::comparison::Comparison;
use crate::model::{AttributeMap, TypeSpec, Value};
use crate::reconcile::{ComparisonOutcome, Discrepancy};

use super::INDENT;

/// Render a Comparison at the given indent
///
/// A failed last outcome renders as its discrepancy block; a passed or
/// not-yet-compared Comparison renders its expected attributes.
pub fn render_comparison(comparison: &Comparison, indent: usize) -> String {
    if let Some(outcome) = comparison.last_ref().as_ref() {
        if !outcome.passed() {
            return render_outcome(outcome, indent);
        }
    }
    render_expected(comparison.type_spec(), comparison.expected().as_ref(), indent)
}

/// Render the discrepancies of an outcome at the given indent
///
/// A passed outcome carries no attributes of its own and renders as the bare
/// type tag.
pub fn render_outcome(outcome: &ComparisonOutcome, indent: usize) -> String {
    let type_name = &outcome.expected_type;
    if outcome.passed() {
        return format!("<{type_name}>");
    }
    if outcome.is_wrong_type() {
        return format!("<(failed):{type_name}>wrong type</{type_name}>");
    }

    let pad = " ".repeat(indent);
    let mut out = format!("\n{pad}<(failed):{type_name}>\n");
    for discrepancy in &outcome.discrepancies {
        out.push_str(&pad);
        push_discrepancy(&mut out, discrepancy, indent);
        out.push('\n');
    }
    let _ = write!(out, "{pad}</{type_name}>");
    out
}

/// Textual form of a value inside a block at the given indent
///
/// Nested Comparisons render one step deeper; everything else uses its
/// `Display` form.
pub fn render_value(value: &Value, indent: usize) -> String {
    match value {
        Value::Comparison(nested) => render_comparison(nested, indent + INDENT),
        other => other.to_string(),
    }
}

fn render_expected(type_spec: &TypeSpec, expected: Option<&AttributeMap>, indent: usize) -> String {
    let Some(expected) = expected else {
        return format!("<{type_spec}>");
    };

    let pad = " ".repeat(indent);
    let mut out = format!("\n{pad}<{type_spec}>\n");
    for (name, value) in expected.iter() {
        let _ = writeln!(out, "{pad}{name}:{}", render_declared(value, indent));
    }
    let _ = write!(out, "{pad}</{type_spec}>");
    out
}

/// Like [`render_value`], but a nested Comparison shows what it expects and
/// never a result it recorded against some other value
fn render_declared(value: &Value, indent: usize) -> String {
    match value {
        Value::Comparison(nested) => render_expected(
            nested.type_spec(),
            nested.expected().as_ref(),
            indent + INDENT,
        ),
        other => other.to_string(),
    }
}

fn push_discrepancy(out: &mut String, discrepancy: &Discrepancy, indent: usize) {
    let _ = match discrepancy {
        Discrepancy::WrongType { .. } => write!(out, "wrong type"),
        Discrepancy::MissingOnOther { name, expected } => {
            write!(out, "{name}:{} not in other", render_declared(expected, indent))
        }
        Discrepancy::MissingOnExpected { name, actual } => {
            write!(out, "{name}:{} not in Comparison", render_declared(actual, indent))
        }
        Discrepancy::ValueMismatch {
            name,
            expected,
            actual,
            nested,
        } => {
            let expected_text = match nested {
                Some(outcome) => render_outcome(outcome, indent + INDENT),
                None => render_value(expected, indent),
            };
            write!(
                out,
                "{name}:{expected_text} != {}",
                render_value(actual, indent)
            )
        }
    };
}
