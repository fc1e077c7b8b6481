//! Assertion helpers built on Comparisons.
//!
//! [`compare`] and [`assert_like!`](crate::assert_like!) check one value
//! against another, where either side may be (or contain) a Comparison.
//! [`ShouldRaise`] checks the error side of a `Result`.

mod should_raise;

pub use should_raise::ShouldRaise;

use crate::errors::{LikenessError, Result};
use crate::model::Value;

/// Check that `expected` equals `actual`
///
/// Comparisons anywhere inside either value take part through their own
/// reconciliation, so the failure message shows their diagnostics.
///
/// # Errors
///
/// - `AssertionFailed` with message `"{expected} != {actual}"` on mismatch
/// - `IntrospectionUnsupported` from a strict Comparison against a value with
///   no attribute mapping
pub fn compare(expected: impl Into<Value>, actual: impl Into<Value>) -> Result<()> {
    let expected = expected.into();
    let actual = actual.into();

    if expected.try_eq(&actual)? {
        return Ok(());
    }
    Err(LikenessError::AssertionFailed {
        message: format!("{expected} != {actual}"),
    })
}

/// Assert that two values are equal, panicking with the rendered diagnostics
///
/// ```
/// use likeness_core::{assert_like, Comparison, Value};
///
/// assert_like!(Comparison::of::<i64>(), 3);
/// assert_like!(Value::list([1, 2]), vec![1, 2]);
/// ```
#[macro_export]
macro_rules! assert_like {
    ($expected:expr, $actual:expr $(,)?) => {
        if let ::std::result::Result::Err(err) = $crate::assertions::compare($expected, $actual) {
            panic!("{}", err);
        }
    };
    ($expected:expr, $actual:expr, $($arg:tt)+) => {
        if let ::std::result::Result::Err(err) = $crate::assertions::compare($expected, $actual) {
            panic!("{}: {}", format_args!($($arg)+), err);
        }
    };
}
