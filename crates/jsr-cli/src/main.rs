//! # jsr-cli
//!
//! Terminal browser for the JSR package registry.
//!
//! This is the main entry point for the `jsr` binary. It handles command parsing,
//! loads configuration, sets up logging and dispatches to the command handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jsr_core::error::{JsrError, JsrResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Browse packages, scopes and docs on the JSR registry
#[derive(Parser)]
#[command(name = "jsr", version, about = "Terminal browser for the JSR registry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Registry access token, kept for this process only
    #[arg(long, global = true, env = "JSR_TOKEN", hide_env_values = true, default_value = "")]
    pub token: String,

    /// Registry API origin
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show featured packages
    Home,
    /// Search packages
    Search {
        query: Option<String>,
    },
    /// Show a package
    Package {
        /// Package as @scope/name
        package: String,
        #[arg(long, default_value = "latest")]
        version: String,
        /// Write the README as an HTML document
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// List versions of a package
    Versions {
        package: String,
    },
    /// Render package documentation as HTML
    Docs {
        package: String,
        #[arg(long, default_value = "latest")]
        version: String,
        /// Index every exported symbol instead of the README
        #[arg(long)]
        all_symbols: bool,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Show the quality score of a package
    Score {
        package: String,
    },
    /// List packages in a scope
    Scope {
        scope: String,
    },
    /// List members of a scope
    Members {
        scope: String,
    },
    /// Show quotas and security settings of a scope
    ScopeSettings {
        scope: String,
    },
    /// Show the logged-in user and their scopes
    Profile,
    /// Check an access token against the registry
    Login {
        /// Token to check; defaults to --token / JSR_TOKEN
        token: Option<String>,
    },
    /// Drop the access token
    Logout,
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_panic_handler();

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> JsrResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| JsrError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let (ctx, source) =
            CommandContext::new(&cli.token, cli.api_url.as_deref(), cli.log_level.as_deref()).await?;

        setup_logging(log_level(cli.verbose, &ctx.config.log.level));
        info!("Starting jsr v{} against {}", env!("CARGO_PKG_VERSION"), ctx.client.base_url());
        info!("Using configuration from {:?}", source);

        match cli.command {
            Some(command) => commands::dispatch_command(command, &ctx).await,
            None => commands::show_help(&ctx).await,
        }
    })
}

/// `--verbose` forces debug over the configured level
fn log_level(verbose: bool, configured_level: &str) -> &str {
    if verbose {
        "debug"
    } else {
        configured_level
    }
}

/// `RUST_LOG` replaces the level filter entirely when set
fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "jsr={level},jsr_core={level},jsr_config={level},jsr_registry={level}",
            level = level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("jsr encountered an unexpected error: {}", panic_info);
        eprintln!("jsr crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/jsr-tools/jsr-cli/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
