//! `@scope/name` package references.

use std::fmt;
use std::str::FromStr;

use crate::error::JsrError;

/// Identity of a package within the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    pub scope: String,
    pub name: String,
}

impl PackageRef {
    pub fn new(scope: &str, name: &str) -> Self {
        Self {
            scope: strip_scope_prefix(scope).to_string(),
            name: name.to_string(),
        }
    }

    /// Check if this is a valid scope or package name segment
    pub fn is_valid_segment(segment: &str) -> bool {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !segment.starts_with('-')
            && !segment.ends_with('-')
    }
}

/// `@std` and `std` name the same scope
pub fn strip_scope_prefix(scope: &str) -> &str {
    scope.strip_prefix('@').unwrap_or(scope)
}

impl FromStr for PackageRef {
    type Err = JsrError;

    /// Accepts `@scope/name`, `scope/name` and `jsr:@scope/name`
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| JsrError::InvalidReference {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix("jsr:").unwrap_or(trimmed);
        let (scope, name) = trimmed
            .split_once('/')
            .ok_or_else(|| invalid("expected @scope/name"))?;
        let scope = strip_scope_prefix(scope);

        if !Self::is_valid_segment(scope) {
            return Err(invalid("scope must be lowercase letters, digits or hyphens"));
        }
        if !Self::is_valid_segment(name) {
            return Err(invalid("name must be lowercase letters, digits or hyphens"));
        }

        Ok(Self::new(scope, name))
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}/{}", self.scope, self.name)
    }
}
