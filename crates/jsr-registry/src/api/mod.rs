//! JSR registry API response types

use serde::{Deserialize, Serialize};
use jsr_core::types::Package;

pub mod responses;

pub use responses::{
    GetPackageDocsResponse, GetPackageScoreResponse, GetScopeResponse, GetSelfUserResponse,
    GetStatsResponse, ListPackageVersionsResponse, ListPackagesResponse, ListScopeMembersResponse,
    ListScopePackagesResponse, ListSelfUserScopesResponse,
};

/// One page of packages
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PackageList {
    /// Packages on this page (the registry may omit the field)
    #[serde(default)]
    pub items: Vec<Package>,
    /// Total number of matches across all pages
    #[serde(default)]
    pub total: u64,
}

/// Registry front-page statistics
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Stats {
    /// Recently created packages
    #[serde(default)]
    pub newest: Vec<Package>,
    /// Packages highlighted by the registry
    #[serde(default)]
    pub featured: Vec<Package>,
}

/// Error body the registry attaches to 4xx answers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Decode an error body, keeping the raw text when it is not the usual shape
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|_| Self {
            code: "unknown".to_string(),
            message: String::from_utf8_lossy(body).into_owned(),
        })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_json_body() {
        let err = ApiError::from_body(br#"{"code":"packageNotFound","message":"The package was not found."}"#);
        assert_eq!(err.code, "packageNotFound");
        assert_eq!(err.to_string(), "packageNotFound: The package was not found.");
    }

    #[test]
    fn test_api_error_from_plain_body() {
        let err = ApiError::from_body(b"upstream went away");
        assert_eq!(err.code, "unknown");
        assert_eq!(err.message, "upstream went away");
    }

    #[test]
    fn test_package_list_without_items() {
        let list: PackageList = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(list.items.is_empty());
    }
}
