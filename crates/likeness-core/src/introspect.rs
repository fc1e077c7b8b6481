//! Attribute introspection capability and the attribute extractor.
//!
//! A value takes part in a comparison by implementing [`Introspect`]. Plain
//! structs get an implementation from [`introspect!`](crate::introspect!);
//! anything with unusual attribute storage (optional fields, error types
//! carrying positional arguments, values with no enumerable state) implements
//! the trait by hand and adds the reverse equality with
//! [`comparable!`](crate::comparable!).

use std::fmt;

use crate::errors::{LikenessError, Result};
use crate::model::{AttributeMap, Attributes, TypeSpec, Value};

/// Name of the synthetic attribute holding an error's positional arguments
pub const ARGS_ATTRIBUTE: &str = "args";

/// Capability to be compared structurally by a `Comparison`
pub trait Introspect: fmt::Debug + 'static {
    /// The concrete type of this value
    fn runtime_type(&self) -> TypeSpec;

    /// The value's own enumerable attribute mapping
    ///
    /// Values with no such mapping return [`Attributes::Unsupported`]; they can
    /// still be compared loosely through [`Introspect::attribute`].
    fn attributes(&self) -> Attributes {
        Attributes::Unsupported
    }

    /// Look up a single attribute by name
    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes()
            .as_map()
            .and_then(|map| map.get(name).cloned())
    }

    /// Positional construction arguments of an error-like value
    ///
    /// When present and the value has no (or an empty) attribute mapping, these
    /// are exposed as a single `args` tuple attribute.
    fn positional_args(&self) -> Option<Vec<Value>> {
        None
    }

    /// Textual form used in diagnostics
    fn repr(&self) -> String {
        format!("{:?}", self)
    }
}

/// Attribute mapping of `value`, with the positional-arguments fallback applied
///
/// # Errors
///
/// Returns `IntrospectionUnsupported` when `required` is set and the value
/// exposes no attribute mapping at all.
pub fn extract(value: &dyn Introspect, required: bool) -> Result<Attributes> {
    let attributes = value.attributes();

    let empty = attributes.as_map().map_or(true, AttributeMap::is_empty);
    if empty {
        if let Some(args) = value.positional_args() {
            return Ok(Attributes::Map(
                AttributeMap::new().with(ARGS_ATTRIBUTE, Value::Tuple(args)),
            ));
        }
    }

    match attributes {
        Attributes::Unsupported if required => Err(LikenessError::IntrospectionUnsupported {
            repr: value.repr(),
        }),
        other => Ok(other),
    }
}

/// Single attribute of `value`, consulting an already extracted mapping first
pub fn lookup(value: &dyn Introspect, extracted: &Attributes, name: &str) -> Option<Value> {
    match extracted {
        Attributes::Map(map) => map.get(name).cloned(),
        Attributes::Unsupported => value.attribute(name),
    }
}

/// Implement [`Introspect`] for a struct from a list of its fields
///
/// Every listed field must be `Clone + Into<Value>`. Also implements
/// `PartialEq<Comparison>` so the type can sit on the left of `==`.
///
/// ```
/// use likeness_core::{introspect, Comparison};
///
/// #[derive(Debug)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// introspect!(Point { x, y });
///
/// let expected = Comparison::of::<Point>().with("x", 1).with("y", 2);
/// assert!(Point { x: 1, y: 2 } == expected);
/// ```
#[macro_export]
macro_rules! introspect {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Introspect for $ty {
            fn runtime_type(&self) -> $crate::TypeSpec {
                $crate::TypeSpec::of::<$ty>()
            }

            fn attributes(&self) -> $crate::Attributes {
                #[allow(unused_mut)]
                let mut map = $crate::AttributeMap::new();
                $(
                    map.insert(
                        stringify!($field),
                        $crate::Value::from(::std::clone::Clone::clone(&self.$field)),
                    );
                )*
                $crate::Attributes::Map(map)
            }
        }

        $crate::comparable!($ty);
    };
}

/// Implement `PartialEq<Comparison>` for a type that implements [`Introspect`]
#[macro_export]
macro_rules! comparable {
    ($ty:ty) => {
        impl ::std::cmp::PartialEq<$crate::Comparison> for $ty {
            fn eq(&self, other: &$crate::Comparison) -> bool {
                other.matches(self)
            }
        }
    };
}
