//! `jsr profile`: the logged-in user and the scopes they belong to

use tracing::{info, warn};

use jsr_core::error::JsrResult;
use jsr_core::types::{Scope, User};
use jsr_registry::api::{GetSelfUserResponse, ListSelfUserScopesResponse};
use jsr_registry::RegistryClient;

use super::CommandContext;

#[derive(Debug, Default)]
pub struct ProfileState {
    pub user: Option<User>,
    pub scopes: Vec<Scope>,
    pub logged_in: bool,
}

/// Fetch the user and their scopes concurrently
pub async fn fetch(client: &RegistryClient) -> ProfileState {
    let (user, scopes) = tokio::join!(client.get_self_user(), client.list_self_user_scopes());

    let user = match user {
        Ok(GetSelfUserResponse::Ok(user)) => Some(user),
        Ok(GetSelfUserResponse::Unauthorized(err)) => {
            info!("Not logged in: {}", err);
            None
        }
        Ok(GetSelfUserResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to get_self_user");
            None
        }
        Err(e) => {
            warn!("Failed to load profile: {}", e);
            None
        }
    };

    let scopes = match scopes {
        Ok(ListSelfUserScopesResponse::Ok(scopes)) => scopes,
        Ok(ListSelfUserScopesResponse::Unauthorized(_)) => Vec::new(),
        Ok(ListSelfUserScopesResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to list_self_user_scopes");
            Vec::new()
        }
        Err(e) => {
            warn!("Failed to load scopes: {}", e);
            Vec::new()
        }
    };

    ProfileState {
        logged_in: user.is_some(),
        scopes: if user.is_some() { scopes } else { Vec::new() },
        user,
    }
}

pub async fn execute(ctx: &CommandContext) -> JsrResult<()> {
    let state = fetch(&ctx.client).await;

    let Some(user) = &state.user else {
        ctx.output.warn("Not logged in. Pass --token or set JSR_TOKEN.");
        return Ok(());
    };

    ctx.output.header(&user.name);
    if let Some(email) = &user.email {
        ctx.output.field("Email", email);
    }
    if !user.avatar_url.is_empty() {
        ctx.output.field("Avatar", &user.avatar_url);
    }
    ctx.output.field("Scopes", &user.scope_quota().to_string());

    for scope in &state.scopes {
        ctx.output.item(&format!("@{}", scope.id()));
    }

    Ok(())
}
