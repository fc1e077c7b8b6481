use crate::comparison::Comparison;
use crate::errors::{LikenessError, Result};
use crate::introspect::Introspect;

/// Expectation about the error an operation fails with
///
/// ```
/// use likeness_core::{introspect, Comparison, ShouldRaise};
///
/// #[derive(Debug)]
/// struct Timeout {
///     after_ms: i64,
/// }
///
/// introspect!(Timeout { after_ms });
///
/// let op = || -> Result<(), Timeout> { Err(Timeout { after_ms: 50 }) };
///
/// let raised = ShouldRaise::new(Comparison::of::<Timeout>().with("after_ms", 50))
///     .run(op)
///     .unwrap();
/// assert_eq!(raised.map(|t| t.after_ms), Some(50));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShouldRaise {
    expected: Option<Comparison>,
    unless: bool,
}

impl ShouldRaise {
    /// Any error will do
    pub fn any() -> Self {
        Self::default()
    }

    /// The error must match `expected`
    pub fn new(expected: Comparison) -> Self {
        Self {
            expected: Some(expected),
            unless: false,
        }
    }

    /// The error must be an `E`, whatever its attributes
    pub fn of<E: 'static>() -> Self {
        Self::new(Comparison::of::<E>())
    }

    /// The error must look like `error`
    pub fn like(error: &dyn Introspect) -> Self {
        Self::new(Comparison::like(error))
    }

    /// When `unless` holds, expect no error at all
    pub fn unless(mut self, unless: bool) -> Self {
        self.unless = unless;
        self
    }

    /// Check the result of an operation, returning the error it raised
    ///
    /// Returns `Ok(None)` when no error was expected and none was raised.
    ///
    /// # Errors
    ///
    /// - `AssertionFailed` when the outcome does not meet the expectation
    /// - `IntrospectionUnsupported` from a strict expectation against an error
    ///   with no attribute mapping
    pub fn check<T, E: Introspect>(&self, result: std::result::Result<T, E>) -> Result<Option<E>> {
        let raised = match result {
            Ok(_) => return self.nothing_raised(),
            Err(raised) => raised,
        };

        if self.unless {
            return Err(failed(format!(
                "{} raised, no exception expected",
                raised.repr()
            )));
        }

        match &self.expected {
            None => Ok(Some(raised)),
            Some(expected) => {
                if expected.try_eq(&raised)? {
                    Ok(Some(raised))
                } else {
                    Err(failed(format!(
                        "{} (expected) != {} (raised)",
                        expected,
                        raised.repr()
                    )))
                }
            }
        }
    }

    /// Run `op` and check its result
    ///
    /// # Errors
    ///
    /// See [`ShouldRaise::check`].
    pub fn run<T, E: Introspect>(
        &self,
        op: impl FnOnce() -> std::result::Result<T, E>,
    ) -> Result<Option<E>> {
        self.check(op())
    }

    fn nothing_raised<E>(&self) -> Result<Option<E>> {
        if self.unless {
            return Ok(None);
        }
        match &self.expected {
            None => Err(failed("No exception raised!".to_string())),
            Some(expected) => Err(failed(format!("{expected} (expected) != None (raised)"))),
        }
    }
}

fn failed(message: String) -> LikenessError {
    LikenessError::AssertionFailed { message }
}
