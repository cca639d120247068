//! Tracing setup for the ngmill command line
//!
//! Records are written to stderr; stdout carries command output only.

use crate::{AppConfig, LogFormat};
use ngmill_foundation::{NgError, NgResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber for `config`
///
/// `RUST_LOG`, when set, replaces the configured level entirely and
/// `LOG_FORMAT` (`json`, `pretty`) replaces the configured format. Fails if
/// a global subscriber is already installed.
///
/// ```bash
/// RUST_LOG=ngmill_lang_angular=debug ngmill add-import --module @angular/core --names Input src/app.ts
/// LOG_FORMAT=json ngmill classes src
/// ```
pub fn initialize(config: &AppConfig) -> NgResult<()> {
    let filter = level_filter(&config.logging.level);
    let format = log_format(config, std::env::var("LOG_FORMAT").ok().as_deref());
    let layer = fmt::layer().with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json().flatten_event(true))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact().without_time())
            .try_init(),
    };

    installed.map_err(|e| NgError::config(format!("Cannot install log subscriber: {}", e)))
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Format selected by an optional `LOG_FORMAT` value, else by `config`
fn log_format(config: &AppConfig, env_override: Option<&str>) -> LogFormat {
    match env_override.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => LogFormat::Json,
        Some("pretty") | Some("human") => LogFormat::Pretty,
        _ => config.logging.format.clone(),
    }
}

/// Span naming the file a command is working on
///
/// ```rust
/// use ngmill_config::logging::file_span;
///
/// let _file = file_span("src/app/app.component.ts", "add-import").entered();
/// tracing::info!("Updating imports");
/// ```
pub fn file_span(path: &str, command: &str) -> tracing::Span {
    tracing::info_span!("file", path = %path, command = %command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.logging.format = LogFormat::Json;
        config
    }

    #[test]
    fn test_format_follows_config_without_override() {
        assert_eq!(log_format(&json_config(), None), LogFormat::Json);
        assert_eq!(log_format(&AppConfig::default(), None), LogFormat::Pretty);
    }

    #[test]
    fn test_format_override_is_case_insensitive() {
        assert_eq!(log_format(&json_config(), Some("PRETTY")), LogFormat::Pretty);
        assert_eq!(log_format(&AppConfig::default(), Some("Json")), LogFormat::Json);
    }

    #[test]
    fn test_unknown_override_falls_back_to_config() {
        assert_eq!(log_format(&json_config(), Some("xml")), LogFormat::Json);
    }
}
