//! `jsr search`: package search.
//!
//! Every negative outcome collapses to an empty result list. The registry
//! only answers 400 for malformed queries, which the user sees as "no
//! results".

use tracing::{info, warn};

use jsr_core::error::JsrResult;
use jsr_core::types::Package;
use jsr_registry::api::ListPackagesResponse;
use jsr_registry::RegistryClient;

use super::CommandContext;

#[derive(Debug, Default)]
pub struct ExploreState {
    pub packages: Vec<Package>,
}

/// Search for `query`; `None` or an empty string lists without a filter
pub async fn fetch(client: &RegistryClient, query: Option<&str>) -> ExploreState {
    match client.list_packages(query).await {
        Ok(ListPackagesResponse::Ok(list)) => ExploreState {
            packages: list.items,
        },
        Ok(ListPackagesResponse::BadRequest(err)) => {
            info!("Registry rejected search {:?}: {}", query, err);
            ExploreState::default()
        }
        Ok(ListPackagesResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to list_packages");
            ExploreState::default()
        }
        Err(e) => {
            warn!("Search failed: {}", e);
            ExploreState::default()
        }
    }
}

pub async fn execute(query: Option<&str>, ctx: &CommandContext) -> JsrResult<()> {
    let state = fetch(&ctx.client, query).await;

    if state.packages.is_empty() {
        ctx.output.info("No packages found");
        return Ok(());
    }

    for package in &state.packages {
        ctx.output.package_card(package);
    }

    Ok(())
}
