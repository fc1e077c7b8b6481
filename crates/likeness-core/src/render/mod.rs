//! Diagnostic rendering for Comparisons and their outcomes.
//!
//! Output is deterministic: attributes and discrepancies are always listed in
//! attribute-name order, and every nested Comparison is rendered one
//! [`INDENT`] step deeper than the block that contains it.

pub mod comparison_render;

pub use comparison_render::{render_comparison, render_outcome, render_value};

/// Indent of a top-level block, and the step added per nesting level
pub const INDENT: usize = 2;
