//! Core types shared across Likeness facilities
//!
//! This crate provides the foundational vocabulary used by both error handling
//! and logging facilities:
//!
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
