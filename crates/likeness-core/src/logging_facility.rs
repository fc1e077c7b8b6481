//! Structured logging facility for Likeness
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions on emitted events
//!
//! # Usage
//!
//! ```rust
//! use likeness_core::logging_facility::{init, Profile};
//!
//! // Initialize once at test-binary startup
//! init(Profile::Development);
//! ```
//!
//! Comparisons log at `debug` level, so nothing is emitted unless a
//! subscriber is installed and the filter lets `likeness` events through.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile, LOG_ENV_VAR};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
