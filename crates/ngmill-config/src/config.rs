//! Application configuration
//!
//! Configuration is layered with figment, from lowest to highest priority:
//! serialized defaults, `ngmill.toml` (or `.ngmill/config.toml`) in the
//! project root, then `NGMILL__SECTION__KEY` environment variables.

use ngmill_foundation::{NgError, NgResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file names searched in the project root, first match wins
pub const CONFIG_FILE_NAMES: [&str; 2] = ["ngmill.toml", ".ngmill/config.toml"];

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "NGMILL__";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// TypeScript parser configuration
    #[serde(default)]
    pub parser: ParserConfig,
    /// Project file discovery configuration
    #[serde(default)]
    pub project: ProjectConfig,
}

/// Log output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format for tooling
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// TypeScript parser configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    /// Accept decorator syntax
    pub decorators: bool,
    /// Force TSX parsing on or off. When unset it follows the file extension.
    pub tsx: Option<bool>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            decorators: true,
            tsx: None,
        }
    }
}

/// Project file discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// File extensions (without the dot) loaded into a project
    pub extensions: Vec<String>,
    /// Glob patterns, relative to the project root, that are never loaded
    pub exclude: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["ts".to_string(), "tsx".to_string()],
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/dist/**".to_string(),
                "**/*.d.ts".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration for the current working directory
    pub fn load() -> NgResult<Self> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration, looking for config files under `root`
    pub fn load_from(root: &Path) -> NgResult<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Toml},
            Figment,
        };

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if let Some(path) = CONFIG_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.exists())
        {
            tracing::debug!(path = %path.display(), "Loading TOML configuration");
            figment = figment.merge(Toml::file(path));
        }

        let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let app_config: AppConfig = figment
            .extract()
            .map_err(|e| NgError::config(format!("Failed to load configuration: {}", e)))?;

        app_config.validate()?;

        tracing::debug!(
            level = %app_config.logging.level,
            extensions = ?app_config.project.extensions,
            "Configuration loaded"
        );

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> NgResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(NgError::config(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        if self.project.extensions.is_empty() {
            return Err(NgError::config(
                "At least one project file extension must be configured",
            ));
        }

        if let Some(ext) = self
            .project
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(NgError::config(format!(
                "Invalid extension '{}', use the bare extension (e.g. \"ts\")",
                ext
            )));
        }

        Ok(())
    }
}
