//! Utility functions and helpers.
//!
//! Common functionality used across multiple jsr crates.

pub mod date;

// Re-export commonly used utilities
pub use date::{format_timestamp, parse_timestamp};
