//! jsr.toml configuration parsing and serialization

use serde::Deserialize;
use jsr_core::error::JsrError;
use crate::ConfigResult;

/// Default registry API origin
pub const DEFAULT_API_URL: &str = "https://api.jsr.io";

/// Stylesheet linked from rendered documentation pages
pub const DEFAULT_STYLESHEET_URL: &str = "https://jsr.io/styles.css";

/// Log levels accepted in `[log] level`
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Complete jsr.toml configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct JsrToml {
    /// Registry connection settings
    #[serde(default)]
    pub registry: RegistrySection,

    /// Logging settings
    #[serde(default)]
    pub log: LogSection,

    /// Documentation rendering settings
    #[serde(default)]
    pub docs: DocsSection,
}

/// Registry connection section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegistrySection {
    /// API origin every request is resolved against
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// User-Agent header sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogSection {
    /// Default tracing level
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Documentation rendering section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocsSection {
    /// Remote stylesheet referenced by generated HTML
    #[serde(default = "default_stylesheet_url")]
    pub stylesheet_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    format!("jsr-cli/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_stylesheet_url() -> String {
    DEFAULT_STYLESHEET_URL.to_string()
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Default for DocsSection {
    fn default() -> Self {
        Self { stylesheet_url: default_stylesheet_url() }
    }
}

/// Parse TOML string to JsrToml configuration
pub fn parse_jsr_toml(content: &str) -> ConfigResult<JsrToml> {
    // First try with toml_edit for better error reporting
    content.parse::<toml_edit::DocumentMut>()
        .map_err(|e| JsrError::ConfigParse {
            path: "jsr.toml".to_string(),
            message: format!("TOML syntax error: {}", e),
        })?;

    // Then parse with serde for type safety
    let config: JsrToml = ::toml::from_str(content)
        .map_err(|e| JsrError::ConfigParse {
            path: "jsr.toml".to_string(),
            message: e.to_string(),
        })?;

    validate_config(&config)?;

    Ok(config)
}

/// Validate configuration values
pub fn validate_config(config: &JsrToml) -> ConfigResult<()> {
    validate_http_url("registry.api_url", &config.registry.api_url)?;
    validate_http_url("docs.stylesheet_url", &config.docs.stylesheet_url)?;

    if config.registry.user_agent.trim().is_empty() {
        return Err(JsrError::ConfigValidation {
            field: "registry.user_agent".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        return Err(JsrError::ConfigValidation {
            field: "log.level".to_string(),
            reason: format!("'{}' is not one of {}", config.log.level, LOG_LEVELS.join(", ")),
        });
    }

    Ok(())
}

/// Load and parse jsr.toml from file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<JsrToml> {
    let content = tokio::fs::read_to_string(path).await
        .map_err(|e| JsrError::io(format!("Failed to read {}", path), e))?;

    parse_jsr_toml(&content)
        .map_err(|e| match e {
            JsrError::ConfigParse { message, .. } => JsrError::ConfigParse {
                path: path.to_string(),
                message,
            },
            JsrError::ConfigValidation { field, reason } => JsrError::ConfigValidation {
                field,
                reason: format!("{} (in {})", reason, path),
            },
            other => other,
        })
}

fn validate_http_url(field: &str, value: &str) -> ConfigResult<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| JsrError::ConfigValidation {
            field: field.to_string(),
            reason: format!("'{}' is not a URL: {}", value, e),
        })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(JsrError::ConfigValidation {
            field: field.to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", scheme),
        }),
    }
}
