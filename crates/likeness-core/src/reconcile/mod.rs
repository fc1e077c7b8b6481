//! Attribute reconciliation engine.
//!
//! Compares an expected type and attribute mapping against an arbitrary value
//! and produces the ordered list of discrepancies between them.
//!
//! ## Entry point
//!
//! ```ignore
//! use likeness_core::reconcile::engine::reconcile;
//!
//! let outcome = reconcile(&expected_type, Some(&expected_attrs), &actual, true)?;
//! assert!(outcome.passed());
//! ```
//!
//! ## Guarantees
//!
//! - **Type first**: a type mismatch is reported alone; no attribute-level
//!   discrepancies are computed for it.
//! - **Determinism**: attribute-level discrepancies are ordered by attribute
//!   name, whatever order the attributes were declared in.
//! - **Fatal vs. folded**: a strict comparison against a value without an
//!   attribute mapping is an error; every other mismatch is folded into the
//!   outcome so a single comparison reports all of them.

pub mod engine;
pub mod model;

pub use engine::reconcile;
pub use model::{ComparisonOutcome, Discrepancy, DiscrepancyKind, DiscrepancySummary, OutcomeSummary};
