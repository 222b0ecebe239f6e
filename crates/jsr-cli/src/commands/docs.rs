//! `jsr docs`: rendered documentation of one package version

use std::path::Path;

use tracing::{info, warn};

use jsr_core::error::{JsrError, JsrResult};
use jsr_core::types::{PackageDocs, PackageRef};
use jsr_registry::api::GetPackageDocsResponse;
use jsr_registry::RegistryClient;

use super::CommandContext;
use crate::output::html::render_docs_html;

/// Outcome of a docs request; at most one of the two fields is set
#[derive(Debug, Default)]
pub struct DocsState {
    pub docs: Option<PackageDocs>,
    pub not_found: bool,
}

pub async fn fetch(
    client: &RegistryClient,
    reference: &PackageRef,
    version: &str,
    all_symbols: bool,
) -> DocsState {
    let response = client
        .get_package_version_docs(&reference.scope, &reference.name, version, all_symbols)
        .await;

    match response {
        Ok(GetPackageDocsResponse::Ok(docs)) => DocsState {
            docs: Some(docs),
            not_found: false,
        },
        Ok(GetPackageDocsResponse::NotFound(err)) => {
            info!("{}@{} not found: {}", reference, version, err);
            DocsState {
                docs: None,
                not_found: true,
            }
        }
        Ok(GetPackageDocsResponse::BadRequest(err)) => {
            info!("Registry rejected docs request: {}", err);
            DocsState::default()
        }
        Ok(GetPackageDocsResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to get_package_version_docs");
            DocsState::default()
        }
        Err(e) => {
            warn!("Failed to load docs of {}: {}", reference, e);
            DocsState::default()
        }
    }
}

pub async fn execute(
    reference: &PackageRef,
    version: &str,
    all_symbols: bool,
    out: Option<&Path>,
    ctx: &CommandContext,
) -> JsrResult<()> {
    let state = fetch(&ctx.client, reference, version, all_symbols).await;

    let docs = match (&state.docs, state.not_found) {
        (Some(docs), _) => docs,
        (None, true) => {
            ctx.output.warn("No version found");
            return Ok(());
        }
        (None, false) => {
            ctx.output.error(&format!("Could not load docs for {}", reference));
            return Ok(());
        }
    };

    let html = render_docs_html(docs, &ctx.config.docs.stylesheet_url);
    match out {
        Some(out) => {
            let path = ctx.resolve_path(out);
            tokio::fs::write(&path, html)
                .await
                .map_err(|e| JsrError::io(format!("Failed to write {}", path.display()), e))?;
            ctx.output.success(&format!(
                "Docs for {}@{} written to {}",
                reference,
                docs.version.id(),
                path.display()
            ));
        }
        None => ctx.output.document(&html),
    }

    Ok(())
}
