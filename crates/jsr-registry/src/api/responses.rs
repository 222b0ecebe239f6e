//! Per-endpoint response unions.
//!
//! Each endpoint answers with its own closed set of outcomes. A status code
//! the endpoint does not document ends up in `Undocumented` with the raw
//! status and body, even when another endpoint does document it.

use jsr_core::types::{PackageDocs, PackageScore, PackageVersion, Scope, ScopeMember, User};

use super::{ApiError, PackageList, Stats};

/// `GET /packages`
#[derive(Debug, Clone, PartialEq)]
pub enum ListPackagesResponse {
    Ok(PackageList),
    BadRequest(ApiError),
    Undocumented { status: u16, body: String },
}

/// `GET /stats`
#[derive(Debug, Clone, PartialEq)]
pub enum GetStatsResponse {
    Ok(Stats),
    Undocumented { status: u16, body: String },
}

/// `GET /scopes/{scope}/packages/{package}/score`
#[derive(Debug, Clone, PartialEq)]
pub enum GetPackageScoreResponse {
    Ok(PackageScore),
    BadRequest(ApiError),
    NotFound(ApiError),
    Undocumented { status: u16, body: String },
}

/// `GET /scopes/{scope}/packages/{package}/versions`
#[derive(Debug, Clone, PartialEq)]
pub enum ListPackageVersionsResponse {
    Ok(Vec<PackageVersion>),
    BadRequest(ApiError),
    NotFound(ApiError),
    Undocumented { status: u16, body: String },
}

/// `GET /scopes/{scope}/packages/{package}/versions/{version}/docs`
#[derive(Debug, Clone, PartialEq)]
pub enum GetPackageDocsResponse {
    Ok(PackageDocs),
    BadRequest(ApiError),
    /// The package or the requested version does not exist
    NotFound(ApiError),
    Undocumented { status: u16, body: String },
}

/// `GET /scopes/{scope}`
#[derive(Debug, Clone, PartialEq)]
pub enum GetScopeResponse {
    Ok(Scope),
    BadRequest(ApiError),
    Unauthorized(ApiError),
    NotFound(ApiError),
    Undocumented { status: u16, body: String },
}

/// `GET /scopes/{scope}/members`
#[derive(Debug, Clone, PartialEq)]
pub enum ListScopeMembersResponse {
    Ok(Vec<ScopeMember>),
    BadRequest(ApiError),
    Unauthorized(ApiError),
    NotFound(ApiError),
    Undocumented { status: u16, body: String },
}

/// `GET /scopes/{scope}/packages`
#[derive(Debug, Clone, PartialEq)]
pub enum ListScopePackagesResponse {
    Ok(PackageList),
    BadRequest(ApiError),
    NotFound(ApiError),
    Undocumented { status: u16, body: String },
}

/// `GET /user`
#[derive(Debug, Clone, PartialEq)]
pub enum GetSelfUserResponse {
    Ok(User),
    /// No token, or the token was rejected
    Unauthorized(ApiError),
    Undocumented { status: u16, body: String },
}

/// `GET /user/scopes`
#[derive(Debug, Clone, PartialEq)]
pub enum ListSelfUserScopesResponse {
    Ok(Vec<Scope>),
    Unauthorized(ApiError),
    Undocumented { status: u16, body: String },
}

impl ListPackagesResponse {
    pub fn into_ok(self) -> Option<PackageList> {
        match self {
            Self::Ok(list) => Some(list),
            _ => None,
        }
    }
}

impl GetStatsResponse {
    pub fn into_ok(self) -> Option<Stats> {
        match self {
            Self::Ok(stats) => Some(stats),
            _ => None,
        }
    }
}

impl GetPackageScoreResponse {
    pub fn into_ok(self) -> Option<PackageScore> {
        match self {
            Self::Ok(score) => Some(score),
            _ => None,
        }
    }
}

impl ListPackageVersionsResponse {
    pub fn into_ok(self) -> Option<Vec<PackageVersion>> {
        match self {
            Self::Ok(versions) => Some(versions),
            _ => None,
        }
    }
}

impl GetPackageDocsResponse {
    pub fn into_ok(self) -> Option<PackageDocs> {
        match self {
            Self::Ok(docs) => Some(docs),
            _ => None,
        }
    }
}

impl GetScopeResponse {
    pub fn into_ok(self) -> Option<Scope> {
        match self {
            Self::Ok(scope) => Some(scope),
            _ => None,
        }
    }
}

impl ListScopeMembersResponse {
    pub fn into_ok(self) -> Option<Vec<ScopeMember>> {
        match self {
            Self::Ok(members) => Some(members),
            _ => None,
        }
    }
}

impl ListScopePackagesResponse {
    pub fn into_ok(self) -> Option<PackageList> {
        match self {
            Self::Ok(list) => Some(list),
            _ => None,
        }
    }
}

impl GetSelfUserResponse {
    pub fn into_ok(self) -> Option<User> {
        match self {
            Self::Ok(user) => Some(user),
            _ => None,
        }
    }
}

impl ListSelfUserScopesResponse {
    pub fn into_ok(self) -> Option<Vec<Scope>> {
        match self {
            Self::Ok(scopes) => Some(scopes),
            _ => None,
        }
    }
}
