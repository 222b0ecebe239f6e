//! Registry entity types.
//!
//! Every type here is an immutable snapshot decoded from the registry API:
//! - Packages, versions, docs payloads and scores
//! - Scopes, their quotas and members
//! - Users
//! - `@scope/name` references typed on the command line

pub mod package;
pub mod reference;
pub mod scope;
pub mod user;

// Re-export all public types
pub use package::{
    GithubRepository, Package, PackageDocs, PackageScore, PackageVersion, RuntimeCompat, ScoreBand,
};
pub use reference::{strip_scope_prefix, PackageRef};
pub use scope::{Quota, Scope, ScopeMember, ScopeQuotas};
pub use user::User;
