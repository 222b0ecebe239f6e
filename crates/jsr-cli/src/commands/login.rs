//! `jsr login` and `jsr logout`.
//!
//! The token lives in the session for this process only. The client is
//! rebound synchronously so the follow-up `get_self_user` already carries it.

use tracing::{info, warn};

use jsr_core::error::JsrResult;
use jsr_core::types::User;
use jsr_registry::api::GetSelfUserResponse;
use jsr_registry::{RegistryClient, Session};

use super::CommandContext;

/// Store `token` and confirm it against the registry
pub async fn login(client: &RegistryClient, session: &Session, token: &str) -> JsrResult<Option<User>> {
    session.begin_login(token);
    if let Err(e) = client.set_token(token) {
        session.fail_login();
        return Err(e);
    }

    match client.get_self_user().await {
        Ok(GetSelfUserResponse::Ok(user)) => {
            session.complete_login(&user);
            Ok(Some(user))
        }
        Ok(GetSelfUserResponse::Unauthorized(err)) => {
            info!("Token rejected: {}", err);
            session.fail_login();
            Ok(None)
        }
        Ok(GetSelfUserResponse::Undocumented { status, body }) => {
            warn!(status, %body, "Unexpected answer to get_self_user");
            session.fail_login();
            Ok(None)
        }
        Err(e) => {
            warn!("Login check failed: {}", e);
            session.fail_login();
            Ok(None)
        }
    }
}

/// Forget the token and drop authentication from the client
pub fn logout(client: &RegistryClient, session: &Session) -> JsrResult<()> {
    session.logout();
    client.set_token("")
}

pub async fn execute_login(token: Option<String>, ctx: &CommandContext) -> JsrResult<()> {
    let token = token.unwrap_or_else(|| ctx.session.snapshot().access_token);
    if token.is_empty() {
        ctx.output.error("No token given. Pass one as an argument, with --token or via JSR_TOKEN.");
        return Ok(());
    }

    match login(&ctx.client, &ctx.session, &token).await? {
        Some(user) => ctx.output.success(&format!("Logged in as {}", user.name)),
        None => ctx.output.error("Login failed"),
    }

    Ok(())
}

pub fn execute_logout(ctx: &CommandContext) -> JsrResult<()> {
    logout(&ctx.client, &ctx.session)?;
    ctx.output.success("Logged out");
    ctx.output.info("Unset JSR_TOKEN to stay logged out in future runs.");
    Ok(())
}
