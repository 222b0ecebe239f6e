//! Configuration discovery, layering and environment overrides

use std::collections::HashMap;
use camino::Utf8PathBuf;
use jsr_core::error::JsrError;
use crate::{ConfigResult, toml::JsrToml};

/// Project configuration file name
pub const CONFIG_FILE_NAME: &str = "jsr.toml";

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration layering and merging
pub struct ConfigLayering;

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// jsr.toml found in the working directory or one of its parents
    Project(Utf8PathBuf),
    /// ~/.jsr/config.toml
    Global(Utf8PathBuf),
    /// No file found, built-in defaults
    Defaults,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load configuration: project file, then global file, then defaults
    pub async fn load(&self) -> ConfigResult<(JsrToml, ConfigSource)> {
        if let Some(project_path) = self.find_project_config() {
            let config = crate::toml::load_from_file(&project_path).await?;
            return Ok((config, ConfigSource::Project(project_path)));
        }

        if let Some(global_path) = Self::global_config_path()? {
            if global_path.exists() {
                let config = crate::toml::load_from_file(&global_path).await?;
                return Ok((config, ConfigSource::Global(global_path)));
            }
        }

        Ok((JsrToml::default(), ConfigSource::Defaults))
    }

    /// Find jsr.toml in the project (walks up directory tree)
    pub fn find_project_config(&self) -> Option<Utf8PathBuf> {
        let mut current = Some(self.cwd.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            current = dir.parent();
        }

        None
    }

    /// Location of the per-user configuration file, if a home directory exists
    pub fn global_config_path() -> ConfigResult<Option<Utf8PathBuf>> {
        let Some(home_dir) = dirs::home_dir() else {
            return Ok(None);
        };

        let home_dir = Utf8PathBuf::try_from(home_dir)
            .map_err(|e| JsrError::ConfigValidation {
                field: "home_dir".to_string(),
                reason: format!("Invalid home directory path: {}", e),
            })?;

        Ok(Some(home_dir.join(".jsr").join("config.toml")))
    }
}

impl ConfigLayering {
    /// Apply environment then command-line overrides and re-validate
    pub fn merge(
        config: JsrToml,
        env_overrides: &HashMap<String, String>,
        cli_overrides: &HashMap<String, String>,
    ) -> ConfigResult<JsrToml> {
        let mut merged = config;

        Self::apply_env_overrides(&mut merged, env_overrides);

        // CLI flag overrides (highest priority)
        Self::apply_cli_overrides(&mut merged, cli_overrides);

        crate::toml::validate_config(&merged)?;

        Ok(merged)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: &mut JsrToml, overrides: &HashMap<String, String>) {
        for (key, value) in overrides {
            match key.as_str() {
                "JSR_API_URL" => config.registry.api_url = value.clone(),
                "JSR_USER_AGENT" => config.registry.user_agent = value.clone(),
                "JSR_LOG" => config.log.level = value.to_lowercase(),
                "JSR_STYLESHEET_URL" => config.docs.stylesheet_url = value.clone(),
                _ => {
                    // JSR_TOKEN and unknown variables are not configuration
                }
            }
        }
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(config: &mut JsrToml, overrides: &HashMap<String, String>) {
        for (key, value) in overrides {
            match key.as_str() {
                "api-url" => config.registry.api_url = value.clone(),
                "log-level" => config.log.level = value.to_lowercase(),
                _ => {}
            }
        }
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with("JSR_") && key != "JSR_TOKEN")
            .collect()
    }
}
