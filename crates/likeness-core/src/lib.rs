//! Likeness - structural-equality matchers for tests
//!
//! A [`Comparison`] checks that a value has an expected type and, optionally,
//! that a chosen subset (or all) of its attributes hold expected values. When
//! a check fails, the Comparison renders a diff naming every type and attribute
//! expectation that was not met.
//!
//! This crate provides:
//! - The [`Introspect`] capability and the `introspect!` / `comparable!` macros
//! - A [`TypeRegistry`] resolving dotted paths to types, with TOML-loaded aliases
//! - Strict and loose attribute reconciliation
//! - Deterministic, nested diff rendering
//! - Assertion helpers: [`compare`], `assert_like!` and [`ShouldRaise`]

pub mod assertions;
pub mod comparison;
pub mod config;
pub mod errors;
pub mod introspect;
pub mod logging_facility;
pub mod model;
pub mod reconcile;
pub mod registry;
pub mod render;

// Used by the exported macros
#[doc(hidden)]
pub use likeness_core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use assertions::{compare, ShouldRaise};
pub use comparison::Comparison;
pub use config::RegistryConfig;
pub use errors::{ExError, ExErrorKind, LikenessError, Result};
pub use introspect::Introspect;
pub use model::{AttributeMap, Attributes, TypeKind, TypeSpec, Value};
pub use reconcile::{ComparisonOutcome, Discrepancy, DiscrepancyKind, OutcomeSummary};
pub use registry::{Target, TypeRegistry};
