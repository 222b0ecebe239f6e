//! `jsr home`: featured packages from the registry front page

use tracing::warn;

use jsr_core::error::JsrResult;
use jsr_core::types::Package;
use jsr_registry::api::GetStatsResponse;
use jsr_registry::RegistryClient;

use super::CommandContext;

#[derive(Debug, Default)]
pub struct HomeState {
    pub featured: Vec<Package>,
}

pub async fn fetch(client: &RegistryClient) -> HomeState {
    match client.get_stats().await {
        Ok(GetStatsResponse::Ok(stats)) => HomeState {
            featured: stats.featured,
        },
        Ok(GetStatsResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to get_stats");
            HomeState::default()
        }
        Err(e) => {
            warn!("Failed to load featured packages: {}", e);
            HomeState::default()
        }
    }
}

pub async fn execute(ctx: &CommandContext) -> JsrResult<()> {
    let state = fetch(&ctx.client).await;

    ctx.output.header("Featured packages");
    if state.featured.is_empty() {
        ctx.output.info("Nothing featured right now");
    }
    for package in &state.featured {
        ctx.output.package_card(package);
    }

    Ok(())
}
