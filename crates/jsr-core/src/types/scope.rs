//! Scope, quota and membership snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// A namespace owning zero or more packages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub scope: String,
    #[serde(default)]
    pub creator: Option<User>,
    /// Only present when the caller is allowed to see it
    #[serde(default)]
    pub quotas: Option<ScopeQuotas>,
    #[serde(default)]
    pub gh_actions_verify_actor: Option<bool>,
    #[serde(default, rename = "requirePublishingFromCI")]
    pub require_publishing_from_ci: Option<bool>,
    #[serde(with = "crate::utils::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::date")]
    pub updated_at: DateTime<Utc>,
}

/// Raw quota counters as sent by the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeQuotas {
    #[serde(default)]
    pub package_usage: Option<u32>,
    #[serde(default)]
    pub package_limit: Option<u32>,
    #[serde(default)]
    pub new_package_per_week_usage: Option<u32>,
    #[serde(default)]
    pub new_package_per_week_limit: Option<u32>,
    #[serde(default)]
    pub publish_attempts_per_week_usage: Option<u32>,
    #[serde(default)]
    pub publish_attempts_per_week_limit: Option<u32>,
}

/// A usage/limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub used: u32,
    pub limit: u32,
}

/// Membership of a user in a scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeMember {
    #[serde(default)]
    pub scope: String,
    pub user: User,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, with = "crate::utils::date::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::date::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Scope {
    pub fn id(&self) -> &str {
        &self.scope
    }

    /// Restrict publishing from GitHub Actions to scope members
    pub fn verifies_actor(&self) -> bool {
        self.gh_actions_verify_actor.unwrap_or(false)
    }

    pub fn requires_ci_publish(&self) -> bool {
        self.require_publishing_from_ci.unwrap_or(false)
    }
}

impl ScopeQuotas {
    pub const DEFAULT_PACKAGE_LIMIT: u32 = 100;
    pub const DEFAULT_NEW_PACKAGES_PER_WEEK_LIMIT: u32 = 20;
    pub const DEFAULT_PUBLISH_ATTEMPTS_PER_WEEK_LIMIT: u32 = 1000;

    /// Total packages in the scope
    pub fn packages(&self) -> Quota {
        Quota::new(
            self.package_usage,
            self.package_limit,
            Self::DEFAULT_PACKAGE_LIMIT,
        )
    }

    pub fn new_packages_per_week(&self) -> Quota {
        Quota::new(
            self.new_package_per_week_usage,
            self.new_package_per_week_limit,
            Self::DEFAULT_NEW_PACKAGES_PER_WEEK_LIMIT,
        )
    }

    pub fn publish_attempts_per_week(&self) -> Quota {
        Quota::new(
            self.publish_attempts_per_week_usage,
            self.publish_attempts_per_week_limit,
            Self::DEFAULT_PUBLISH_ATTEMPTS_PER_WEEK_LIMIT,
        )
    }
}

impl Quota {
    /// Missing usage counts as zero, missing limit falls back to `default_limit`
    pub fn new(used: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            used: used.unwrap_or(0),
            limit: limit.unwrap_or(default_limit),
        }
    }

    /// Fraction of the limit consumed, clamped to 0.0..=1.0
    pub fn ratio(&self) -> f64 {
        if self.limit == 0 {
            return 1.0;
        }
        (self.used as f64 / self.limit as f64).min(1.0)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}

impl std::fmt::Display for Quota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.used, self.limit)
    }
}

impl ScopeMember {
    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> &'static str {
        if self.is_admin {
            "admin"
        } else {
            "member"
        }
    }
}
