//! `jsr scope`: packages published under a scope

use tracing::{info, warn};

use jsr_core::error::JsrResult;
use jsr_core::types::Package;
use jsr_registry::api::ListScopePackagesResponse;
use jsr_registry::RegistryClient;

use super::CommandContext;

#[derive(Debug, Default)]
pub struct ScopeState {
    pub packages: Vec<Package>,
}

pub async fn fetch(client: &RegistryClient, scope: &str) -> ScopeState {
    match client.list_scope_packages(scope).await {
        Ok(ListScopePackagesResponse::Ok(list)) => ScopeState {
            packages: list.items,
        },
        Ok(ListScopePackagesResponse::BadRequest(err) | ListScopePackagesResponse::NotFound(err)) => {
            info!("No packages for scope {}: {}", scope, err);
            ScopeState::default()
        }
        Ok(ListScopePackagesResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to list_scope_packages");
            ScopeState::default()
        }
        Err(e) => {
            warn!("Failed to load packages of scope {}: {}", scope, e);
            ScopeState::default()
        }
    }
}

pub async fn execute(scope: &str, ctx: &CommandContext) -> JsrResult<()> {
    let state = fetch(&ctx.client, scope).await;

    ctx.output.header(&format!("@{}", jsr_core::types::strip_scope_prefix(scope)));
    if state.packages.is_empty() {
        ctx.output.info("No packages");
    }
    for package in &state.packages {
        ctx.output.package_card(package);
    }

    Ok(())
}
