//! `jsr score`: quality score breakdown of a package

use tracing::{info, warn};

use jsr_core::error::JsrResult;
use jsr_core::types::{PackageRef, PackageScore, ScoreBand};
use jsr_registry::api::GetPackageScoreResponse;
use jsr_registry::RegistryClient;

use super::CommandContext;

#[derive(Debug, Default)]
pub struct ScoreState {
    pub score: Option<PackageScore>,
}

pub async fn fetch(client: &RegistryClient, reference: &PackageRef) -> ScoreState {
    match client.get_package_score(&reference.scope, &reference.name).await {
        Ok(GetPackageScoreResponse::Ok(score)) => ScoreState { score: Some(score) },
        Ok(GetPackageScoreResponse::BadRequest(err) | GetPackageScoreResponse::NotFound(err)) => {
            info!("No score for {}: {}", reference, err);
            ScoreState::default()
        }
        Ok(GetPackageScoreResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to get_package_score");
            ScoreState::default()
        }
        Err(e) => {
            warn!("Failed to load score of {}: {}", reference, e);
            ScoreState::default()
        }
    }
}

pub fn band_label(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Low => "low",
        ScoreBand::Medium => "medium",
        ScoreBand::High => "high",
    }
}

pub async fn execute(reference: &PackageRef, ctx: &CommandContext) -> JsrResult<()> {
    let state = fetch(&ctx.client, reference).await;

    let Some(score) = state.score else {
        ctx.output.warn(&format!("No score available for {}", reference));
        return Ok(());
    };

    ctx.output.header(&format!("{} score", reference));
    for (label, passed) in score.checks() {
        ctx.output.check(label, passed);
    }
    ctx.output.field(
        "Documented symbols",
        &format!("{}%", score.documented_symbols_display()),
    );

    if let Some(total) = score.total {
        let band = ScoreBand::from_score(total);
        let text = format!("{}% ({})", total, band_label(band));
        ctx.output.field("Total", &ctx.output.score(&text, band));
    }

    Ok(())
}
