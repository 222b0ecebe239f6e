//! # jsr-core
//!
//! Core types and utilities shared across all jsr crates.
//!
//! This crate provides:
//! - Registry entity types (Package, PackageVersion, Scope, User, ...)
//! - JsrError enum for unified error handling
//! - The ISO-8601 date codec used on the wire
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Registry snapshots and reference parsing
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{JsrError, JsrResult};
pub use types::{
    GithubRepository, Package, PackageDocs, PackageRef, PackageScore, PackageVersion, Quota,
    RuntimeCompat, Scope, ScopeMember, ScopeQuotas, ScoreBand, User,
};
