//! Configuration parsing for the jsr client
//!
//! This crate handles parsing and validation of jsr.toml files and layers
//! environment and command-line overrides on top of them.
//!
//! The access token is not configuration: it is supplied per process and
//! never read from or written to disk.

pub mod toml;
pub mod merge;

// Re-export main types
pub use self::toml::{JsrToml, RegistrySection, LogSection, DocsSection};
pub use self::merge::{ConfigLoader, ConfigLayering, ConfigSource};

use jsr_core::error::JsrError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, JsrError>;
