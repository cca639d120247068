//! Configuration management for ngmill

pub mod config;
pub mod logging;

pub use config::{AppConfig, LogFormat, LoggingConfig, ParserConfig, ProjectConfig};
