//! `jsr scope-settings`: quotas and publishing restrictions of a scope.
//!
//! The caller's own scope list seeds the view; a fresh `get_scope` answer
//! replaces it only when it carries quotas, since non-members get the scope
//! without them.

use tracing::{info, warn};

use jsr_core::error::JsrResult;
use jsr_core::types::{strip_scope_prefix, Quota, Scope};
use jsr_registry::api::{GetScopeResponse, ListSelfUserScopesResponse};
use jsr_registry::RegistryClient;

use super::CommandContext;

const GAUGE_WIDTH: usize = 20;

#[derive(Debug, Default)]
pub struct ScopeSettingsState {
    pub scope: Option<Scope>,
}

/// Keep `current` unless `fetched` is the more complete snapshot
pub fn merge_fetched(current: Option<Scope>, fetched: Scope) -> Option<Scope> {
    match current {
        Some(current) if fetched.quotas.is_none() => Some(current),
        _ => Some(fetched),
    }
}

/// Text gauge such as `[#####---------------] 5 / 20`
pub fn quota_gauge(quota: &Quota) -> String {
    let filled = (quota.ratio() * GAUGE_WIDTH as f64).round() as usize;
    format!("[{}{}] {}", "#".repeat(filled), "-".repeat(GAUGE_WIDTH - filled), quota)
}

pub async fn fetch(client: &RegistryClient, scope: &str) -> ScopeSettingsState {
    let name = strip_scope_prefix(scope);
    let (own_scopes, fetched) = tokio::join!(client.list_self_user_scopes(), client.get_scope(name));

    let current = match own_scopes {
        Ok(ListSelfUserScopesResponse::Ok(scopes)) => scopes.into_iter().find(|s| s.id() == name),
        Ok(ListSelfUserScopesResponse::Unauthorized(_)) => None,
        Ok(ListSelfUserScopesResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to list_self_user_scopes");
            None
        }
        Err(e) => {
            warn!("Failed to load own scopes: {}", e);
            None
        }
    };

    let scope = match fetched {
        Ok(GetScopeResponse::Ok(fetched)) => merge_fetched(current, fetched),
        Ok(
            GetScopeResponse::BadRequest(err)
            | GetScopeResponse::Unauthorized(err)
            | GetScopeResponse::NotFound(err),
        ) => {
            info!("Scope {} unavailable: {}", name, err);
            current
        }
        Ok(GetScopeResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to get_scope");
            current
        }
        Err(e) => {
            warn!("Failed to load scope {}: {}", name, e);
            current
        }
    };

    ScopeSettingsState { scope }
}

pub async fn execute(scope: &str, ctx: &CommandContext) -> JsrResult<()> {
    let state = fetch(&ctx.client, scope).await;

    let Some(scope) = state.scope else {
        ctx.output.warn("Scope not found");
        return Ok(());
    };

    ctx.output.header(&format!("@{} settings", scope.id()));

    let quotas = scope.quotas.clone().unwrap_or_default();
    let rows = [
        ("Packages", quotas.packages()),
        ("New packages per week", quotas.new_packages_per_week()),
        ("Publish attempts per week", quotas.publish_attempts_per_week()),
    ];
    for (label, quota) in rows {
        ctx.output.field(label, &quota_gauge(&quota));
        if quota.is_exhausted() {
            ctx.output.warn(&format!("{} quota exhausted", label));
        }
    }

    ctx.output.check("Verify GitHub Actions actor", scope.verifies_actor());
    ctx.output.check("Require publishing from CI", scope.requires_ci_publish());

    Ok(())
}
