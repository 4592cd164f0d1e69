//! Common utilities for the sedge HTML parser.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Errors** - caller-misuse errors raised before any parsing starts
//! - **Warning System** - colored terminal output for parse diagnostics

/// Errors returned when parser options are inconsistent.
pub mod error;
/// Deduplicated, colored diagnostics on stderr.
pub mod warning;
