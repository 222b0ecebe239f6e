//! JSR registry client
//!
//! This crate provides the typed HTTP client for the JSR registry API: one
//! method per endpoint, each returning that endpoint's closed set of
//! outcomes, a bearer-token middleware, and the session object whose token
//! the client follows.

pub mod api;
pub mod client;
pub mod middleware;
pub mod session;

// Re-export main types
pub use api::{ApiError, PackageList, Stats};
pub use client::{ClientConfig, RegistryClient};
pub use middleware::AuthMiddleware;
pub use session::{Session, SessionState};

use jsr_core::error::JsrError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, JsrError>;
