//! `jsr versions`: published versions of a package

use tracing::{info, warn};

use jsr_core::error::JsrResult;
use jsr_core::types::{PackageRef, PackageVersion};
use jsr_core::utils::format_timestamp;
use jsr_registry::api::ListPackageVersionsResponse;
use jsr_registry::RegistryClient;

use super::CommandContext;

#[derive(Debug, Default)]
pub struct VersionsState {
    pub versions: Vec<PackageVersion>,
}

pub async fn fetch(client: &RegistryClient, reference: &PackageRef) -> VersionsState {
    match client.list_package_versions(&reference.scope, &reference.name).await {
        Ok(ListPackageVersionsResponse::Ok(versions)) => VersionsState { versions },
        Ok(ListPackageVersionsResponse::BadRequest(err) | ListPackageVersionsResponse::NotFound(err)) => {
            info!("No versions for {}: {}", reference, err);
            VersionsState::default()
        }
        Ok(ListPackageVersionsResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to list_package_versions");
            VersionsState::default()
        }
        Err(e) => {
            warn!("Failed to load versions of {}: {}", reference, e);
            VersionsState::default()
        }
    }
}

pub async fn execute(reference: &PackageRef, ctx: &CommandContext) -> JsrResult<()> {
    let state = fetch(&ctx.client, reference).await;

    ctx.output.header(&format!("{} versions", reference));
    if state.versions.is_empty() {
        ctx.output.info("No versions published");
    }

    for version in &state.versions {
        let mut line = format!("{}  {}", version.id(), format_timestamp(&version.created_at));
        if version.yanked {
            line.push_str("  (yanked)");
        }
        ctx.output.item(&line);
    }

    Ok(())
}
