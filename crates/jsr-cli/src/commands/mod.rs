//! Command implementations and dispatch logic.
//!
//! Registry-facing commands are split in two: a `fetch` function that turns
//! client responses into a plain view state, and an `execute` function that
//! renders that state through the `OutputHandler`. Registry failures never
//! abort a command; they are logged and the view state falls back to empty.

use std::collections::HashMap;

use camino::Utf8PathBuf;
use tracing::info;

use jsr_config::{ConfigLayering, ConfigLoader, ConfigSource, JsrToml};
use jsr_core::error::{JsrError, JsrResult};
use jsr_core::types::PackageRef;
use jsr_registry::{ClientConfig, RegistryClient, Session};

pub mod docs;
pub mod home;
pub mod login;
pub mod members;
pub mod package;
pub mod profile;
pub mod scope;
pub mod score;
pub mod search;
pub mod settings;
pub mod versions;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub config: JsrToml,
    pub session: Session,
    pub client: RegistryClient,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Load configuration for the working directory and bind a client to `token`.
    ///
    /// Returns where the configuration came from alongside the context.
    pub async fn new(
        token: &str,
        api_url: Option<&str>,
        log_level: Option<&str>,
    ) -> JsrResult<(Self, ConfigSource)> {
        let cwd = std::env::current_dir()
            .map_err(|e| JsrError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| {
            JsrError::io("Current directory is not valid UTF-8".to_string(), e.into_io_error())
        })?;

        let (config, source) = ConfigLoader::new(cwd.clone()).load().await?;

        let mut cli_overrides = HashMap::new();
        if let Some(api_url) = api_url {
            cli_overrides.insert("api-url".to_string(), api_url.to_string());
        }
        if let Some(log_level) = log_level {
            cli_overrides.insert("log-level".to_string(), log_level.to_string());
        }
        let config = ConfigLayering::merge(
            config,
            &ConfigLayering::collect_env_overrides(),
            &cli_overrides,
        )?;

        Ok((Self::from_config(cwd, config, token)?, source))
    }

    /// Build a context from an already merged configuration.
    ///
    /// Must run inside a Tokio runtime: the client is kept in step with the
    /// session by a background task.
    pub fn from_config(cwd: Utf8PathBuf, config: JsrToml, token: &str) -> JsrResult<Self> {
        let session = Session::new(token);
        let client = RegistryClient::with_session(
            ClientConfig {
                base_url: config.registry.api_url.clone(),
                user_agent: config.registry.user_agent.clone(),
            },
            &session,
        )?;
        client.follow(&session);

        Ok(Self {
            cwd,
            config,
            session,
            client,
            output: OutputHandler::new(),
        })
    }

    /// Resolve an output path relative to the working directory
    pub fn resolve_path(&self, path: &std::path::Path) -> std::path::PathBuf {
        self.cwd.as_std_path().join(path)
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> JsrResult<()> {
    match command {
        Commands::Home => {
            info!("Showing featured packages");
            home::execute(ctx).await
        }
        Commands::Search { query } => {
            info!("Searching packages: {:?}", query);
            search::execute(query.as_deref(), ctx).await
        }
        Commands::Package { package, version, out } => {
            let package: PackageRef = package.parse()?;
            info!("Showing {}@{}", package, version);
            package::execute(&package, &version, out.as_deref(), ctx).await
        }
        Commands::Versions { package } => {
            let package: PackageRef = package.parse()?;
            info!("Listing versions of {}", package);
            versions::execute(&package, ctx).await
        }
        Commands::Docs { package, version, all_symbols, out } => {
            let package: PackageRef = package.parse()?;
            info!("Rendering docs for {}@{} (all symbols: {})", package, version, all_symbols);
            docs::execute(&package, &version, all_symbols, out.as_deref(), ctx).await
        }
        Commands::Score { package } => {
            let package: PackageRef = package.parse()?;
            info!("Showing score of {}", package);
            score::execute(&package, ctx).await
        }
        Commands::Scope { scope } => {
            info!("Listing packages in scope {}", scope);
            scope::execute(&scope, ctx).await
        }
        Commands::Members { scope } => {
            info!("Listing members of scope {}", scope);
            members::execute(&scope, ctx).await
        }
        Commands::ScopeSettings { scope } => {
            info!("Showing settings of scope {}", scope);
            settings::execute(&scope, ctx).await
        }
        Commands::Profile => {
            info!("Showing profile");
            profile::execute(ctx).await
        }
        Commands::Login { token } => {
            info!("Logging in");
            login::execute_login(token, ctx).await
        }
        Commands::Logout => {
            info!("Logging out");
            login::execute_logout(ctx)
        }
        Commands::Version => {
            info!("Showing version information");
            show_version(ctx).await
        }
    }
}

/// Show help information
pub async fn show_help(ctx: &CommandContext) -> JsrResult<()> {
    ctx.output.header("jsr - browse the JSR package registry");
    ctx.output.info("");
    ctx.output.info("Usage: jsr [COMMAND] [OPTIONS]");
    ctx.output.info("");
    ctx.output.info("Packages:");
    ctx.output.info("  home                 Featured packages");
    ctx.output.info("  search [query]       Search packages");
    ctx.output.info("  package <pkg>        Package details and README");
    ctx.output.info("  versions <pkg>       Published versions");
    ctx.output.info("  docs <pkg>           Rendered documentation");
    ctx.output.info("  score <pkg>          Quality score");
    ctx.output.info("");
    ctx.output.info("Scopes:");
    ctx.output.info("  scope <scope>        Packages in a scope");
    ctx.output.info("  members <scope>      Scope members");
    ctx.output.info("  scope-settings <s>   Quotas and security settings");
    ctx.output.info("");
    ctx.output.info("Account:");
    ctx.output.info("  profile              Logged-in user and scopes");
    ctx.output.info("  login [token]        Check an access token");
    ctx.output.info("  logout               Drop the access token");
    ctx.output.info("");
    ctx.output.info("Run 'jsr <command> --help' for more information on a command.");
    Ok(())
}

async fn show_version(ctx: &CommandContext) -> JsrResult<()> {
    ctx.output.info(&format!("jsr v{}", env!("CARGO_PKG_VERSION")));
    ctx.output.info(&format!("Built: {}", env!("BUILD_DATE")));
    ctx.output.info(&format!("Target: {}", env!("JSR_TARGET")));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));
    ctx.output.info(&format!("Registry: {}", ctx.client.base_url()));
    Ok(())
}
