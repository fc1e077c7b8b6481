//! The Comparison matcher.
//!
//! A [`Comparison`] describes an expected type and, optionally, the attribute
//! values an instance of it must carry. It sits on either side of `==` against
//! any [`Introspect`] value, reconciles afresh on every check, and keeps the
//! outcome of the most recent one for rendering.
//!
//! ```
//! use likeness_core::{introspect, Comparison};
//!
//! #[derive(Debug)]
//! struct AClass {
//!     x: i64,
//!     y: i64,
//! }
//!
//! introspect!(AClass { x, y });
//!
//! let expected = Comparison::of::<AClass>().with("x", 1).with("y", 2);
//! assert!(expected == AClass { x: 1, y: 2 });
//! assert!(AClass { x: 1, y: 3 } != expected);
//! ```
//!
//! Comparing two matchers against each other is a usage error: the right-hand
//! matcher is just a value of type `Comparison`, so the outcome is a type
//! mismatch rather than a structural check.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;

use crate::errors::Result;
use crate::introspect::{self, Introspect};
use crate::model::{AttributeMap, TypeSpec, Value};
use crate::reconcile::{reconcile, ComparisonOutcome};
use crate::registry::{self, Target, TypeRegistry};
use crate::render;

/// Type-and-attribute aware equality probe
///
/// Not `Sync`: the last outcome lives behind a `RefCell`.
#[derive(Clone)]
pub struct Comparison {
    type_spec: TypeSpec,
    /// Attributes of the instance the Comparison was built from
    defaults: Option<AttributeMap>,
    /// Explicit mapping passed to [`Comparison::with_attrs`]
    attrs: Option<AttributeMap>,
    /// Named values passed to [`Comparison::with`]
    overrides: AttributeMap,
    strict: bool,
    last: RefCell<Option<ComparisonOutcome>>,
    generation: Cell<u64>,
}

impl Comparison {
    /// Build a Comparison, resolving paths through the global registry
    ///
    /// # Errors
    ///
    /// - `UnresolvedPath` / `EmptyPath` when a path target does not resolve
    pub fn new(target: impl Into<Target>) -> Result<Self> {
        match target.into() {
            Target::Path(path) => {
                let spec = registry::with_global(|registry| registry.resolve(&path))?;
                Ok(Self::bare(spec))
            }
            Target::Type(spec) => Ok(Self::bare(spec)),
            // no lock held: attribute access is user code and may register types
            Target::Instance(value) => Ok(Self::like(&value)),
        }
    }

    /// Build a Comparison, resolving paths through `registry`
    ///
    /// # Errors
    ///
    /// - `UnresolvedPath` / `EmptyPath` when a path target does not resolve
    pub fn new_in(registry: &TypeRegistry, target: impl Into<Target>) -> Result<Self> {
        match target.into() {
            Target::Path(path) => Ok(Self::bare(registry.resolve(&path)?)),
            Target::Type(spec) => Ok(Self::bare(spec)),
            Target::Instance(value) => Ok(Self::like(&value)),
        }
    }

    /// Expect an instance of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::bare(TypeSpec::of::<T>())
    }

    /// Expect a value of the same type as `instance`, with its attributes
    pub fn like(instance: &dyn Introspect) -> Self {
        let mut comparison = Self::bare(instance.runtime_type());
        comparison.defaults = instance_defaults(instance);
        comparison
    }

    fn bare(type_spec: TypeSpec) -> Self {
        Self {
            type_spec,
            defaults: None,
            attrs: None,
            overrides: AttributeMap::new(),
            strict: true,
            last: RefCell::new(None),
            generation: Cell::new(0),
        }
    }

    /// Merge an explicit attribute mapping over the instance defaults
    pub fn with_attrs(mut self, attrs: impl Into<AttributeMap>) -> Self {
        let attrs = attrs.into();
        match &mut self.attrs {
            Some(existing) => existing.merge(&attrs),
            None => self.attrs = Some(attrs),
        }
        self
    }

    /// Expect a single attribute value; wins over [`Comparison::with_attrs`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(name, value);
        self
    }

    /// Strict (default) requires the attribute sets to match exactly
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn type_spec(&self) -> &TypeSpec {
        &self.type_spec
    }

    /// The merged expected attributes, `None` for a type-only check
    pub fn expected(&self) -> Option<AttributeMap> {
        if self.defaults.is_none() && self.attrs.is_none() && self.overrides.is_empty() {
            return None;
        }
        let mut merged = self.defaults.clone().unwrap_or_default();
        if let Some(attrs) = &self.attrs {
            merged.merge(attrs);
        }
        merged.merge(&self.overrides);
        Some(merged)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Reconcile against `other` and record the outcome
    ///
    /// # Errors
    ///
    /// - `IntrospectionUnsupported` when strict and `other` (or a value checked
    ///   by a nested Comparison) exposes no attribute mapping. The previous
    ///   outcome is left in place.
    pub fn try_eq(&self, other: &dyn Introspect) -> Result<bool> {
        let expected = self.expected();
        let mut outcome = reconcile(&self.type_spec, expected.as_ref(), other, self.strict)?;

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        outcome.generation = generation;

        let passed = outcome.passed();
        *self.last.borrow_mut() = Some(outcome);
        Ok(passed)
    }

    /// [`Comparison::try_eq`] for use inside `==`
    ///
    /// # Panics
    ///
    /// Panics with the error message when the comparison fails fatally.
    pub fn matches(&self, other: &dyn Introspect) -> bool {
        match self.try_eq(other) {
            Ok(passed) => passed,
            Err(err) => panic!("{}", err),
        }
    }

    /// Outcome of the most recent comparison
    pub fn last_outcome(&self) -> Option<ComparisonOutcome> {
        self.last.borrow().clone()
    }

    /// Number of comparisons recorded so far
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub(crate) fn last_ref(&self) -> Ref<'_, Option<ComparisonOutcome>> {
        self.last.borrow()
    }
}

fn instance_defaults(instance: &dyn Introspect) -> Option<AttributeMap> {
    introspect::extract(instance, false)
        .ok()
        .and_then(|attrs| attrs.into_map())
}

impl Introspect for Comparison {
    fn runtime_type(&self) -> TypeSpec {
        TypeSpec::of::<Comparison>()
    }

    fn repr(&self) -> String {
        self.to_string()
    }
}

impl<T: Introspect> PartialEq<T> for Comparison {
    fn eq(&self, other: &T) -> bool {
        self.matches(other)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::render_comparison(self, render::INDENT))
    }
}

impl fmt::Debug for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
