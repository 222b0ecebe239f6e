//! `jsr members`: members of a scope and their roles

use tracing::{info, warn};

use jsr_core::error::JsrResult;
use jsr_core::types::ScopeMember;
use jsr_registry::api::ListScopeMembersResponse;
use jsr_registry::RegistryClient;

use super::CommandContext;

#[derive(Debug, Default)]
pub struct MembersState {
    pub members: Vec<ScopeMember>,
}

pub async fn fetch(client: &RegistryClient, scope: &str) -> MembersState {
    match client.list_scope_members(scope).await {
        Ok(ListScopeMembersResponse::Ok(members)) => MembersState { members },
        Ok(
            ListScopeMembersResponse::BadRequest(err)
            | ListScopeMembersResponse::Unauthorized(err)
            | ListScopeMembersResponse::NotFound(err),
        ) => {
            info!("Members of {} unavailable: {}", scope, err);
            MembersState::default()
        }
        Ok(ListScopeMembersResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to list_scope_members");
            MembersState::default()
        }
        Err(e) => {
            warn!("Failed to load members of {}: {}", scope, e);
            MembersState::default()
        }
    }
}

pub async fn execute(scope: &str, ctx: &CommandContext) -> JsrResult<()> {
    let state = fetch(&ctx.client, scope).await;

    if state.members.is_empty() {
        ctx.output.info("No members visible");
        return Ok(());
    }

    for member in &state.members {
        ctx.output.item(&format!("{} ({})", member.user.name, member.role()));
    }

    Ok(())
}
