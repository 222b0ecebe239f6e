//! User snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Quota;

/// A registry user, either the caller or a scope member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Only returned for the authenticated user
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub github_id: Option<u64>,
    #[serde(default)]
    pub scope_usage: Option<u32>,
    #[serde(default)]
    pub scope_limit: Option<u32>,
    #[serde(default, with = "crate::utils::date::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::date::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub const DEFAULT_SCOPE_LIMIT: u32 = 3;

    /// How many scopes the user owns out of how many they may create
    pub fn scope_quota(&self) -> Quota {
        Quota::new(self.scope_usage, self.scope_limit, Self::DEFAULT_SCOPE_LIMIT)
    }
}
