//! `jsr package`: package overview with its README.
//!
//! The overview comes from the scope's package list and the README from the
//! version docs; both requests run concurrently. Only the first page of the
//! scope listing is searched, so a package past it has no overview.

use std::path::Path;

use tracing::{debug, info, warn};

use jsr_core::error::{JsrError, JsrResult};
use jsr_core::types::{Package, PackageDocs, PackageRef};
use jsr_registry::api::{GetPackageDocsResponse, ListScopePackagesResponse};
use jsr_registry::RegistryClient;

use super::CommandContext;
use crate::output::html::render_docs_html;

#[derive(Debug, Default)]
pub struct PackageState {
    pub package: Option<Package>,
    pub docs: Option<PackageDocs>,
    /// The requested version does not exist
    pub not_found: bool,
}

pub async fn fetch(client: &RegistryClient, reference: &PackageRef, version: &str) -> PackageState {
    let (listing, readme) = tokio::join!(
        client.list_scope_packages(&reference.scope),
        client.get_package_version_docs(&reference.scope, &reference.name, version, false),
    );

    let package = match listing {
        Ok(ListScopePackagesResponse::Ok(list)) => {
            let listed = list.items.len();
            let found = list.items.into_iter().find(|p| p.name == reference.name);
            if found.is_none() {
                debug!(listed, total = list.total, "{} not on the first page of its scope", reference);
            }
            found
        }
        Ok(ListScopePackagesResponse::BadRequest(err) | ListScopePackagesResponse::NotFound(err)) => {
            info!("No package listing for @{}: {}", reference.scope, err);
            None
        }
        Ok(ListScopePackagesResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to list_scope_packages");
            None
        }
        Err(e) => {
            warn!("Failed to load {}: {}", reference, e);
            None
        }
    };

    let mut state = PackageState {
        package,
        ..Default::default()
    };

    match readme {
        Ok(GetPackageDocsResponse::Ok(docs)) => state.docs = Some(docs),
        Ok(GetPackageDocsResponse::NotFound(err)) => {
            info!("{}@{} not found: {}", reference, version, err);
            state.not_found = true;
        }
        Ok(GetPackageDocsResponse::BadRequest(err)) => {
            info!("Registry rejected README request: {}", err);
        }
        Ok(GetPackageDocsResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to get_package_version_docs");
        }
        Err(e) => warn!("Failed to load README of {}: {}", reference, e),
    }

    state
}

pub async fn execute(
    reference: &PackageRef,
    version: &str,
    out: Option<&Path>,
    ctx: &CommandContext,
) -> JsrResult<()> {
    let state = fetch(&ctx.client, reference, version).await;

    ctx.output.header(&reference.to_string());
    ctx.output.field("Version", version);

    if let Some(docs) = &state.docs {
        if let Some(url) = docs.version.provenance_url() {
            ctx.output.field("Provenance", &url);
        }
    }

    if let Some(package) = &state.package {
        if let Some(github) = &package.github_repository {
            ctx.output.field("GitHub", &github.url());
        }
        if let (Some(score), Some(band)) = (package.score, package.score_band()) {
            ctx.output.field("Score", &ctx.output.score(&format!("{}%", score), band));
        }
        if !package.description.is_empty() {
            ctx.output.info(&package.description);
        }
    }

    if state.not_found {
        ctx.output.warn("No version found");
        return Ok(());
    }

    if let (Some(docs), Some(out)) = (&state.docs, out) {
        let path = ctx.resolve_path(out);
        let html = render_docs_html(docs, &ctx.config.docs.stylesheet_url);
        tokio::fs::write(&path, html)
            .await
            .map_err(|e| JsrError::io(format!("Failed to write {}", path.display()), e))?;
        ctx.output.success(&format!("README written to {}", path.display()));
    } else if state.docs.is_some() {
        ctx.output.info(&format!("Run 'jsr package {} --out README.html' to save the README", reference));
    }

    Ok(())
}
