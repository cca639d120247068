//! Error handling for ngmill

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core error type used throughout ngmill
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NgError {
    #[error("Module {module} not found")]
    ModuleNotFound { module: String },

    #[error("Decorator {decorator} not found")]
    DecoratorNotFound { decorator: String },

    #[error("Class {class} not found")]
    ClassNotFound { class: String },

    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Emit error: {message}")]
    Emit { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NgError {
    /// Create a new module-not-found error
    pub fn module_not_found(module: impl Into<String>) -> Self {
        Self::ModuleNotFound {
            module: module.into(),
        }
    }

    /// Create a new decorator-not-found error
    pub fn decorator_not_found(decorator: impl Into<String>) -> Self {
        Self::DecoratorNotFound {
            decorator: decorator.into(),
        }
    }

    /// Create a new class-not-found error
    pub fn class_not_found(class: impl Into<String>) -> Self {
        Self::ClassNotFound {
            class: class.into(),
        }
    }

    /// Create a new parse error for the given file
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a new emit error
    pub fn emit(message: impl Into<String>) -> Self {
        Self::Emit {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether this error reports a missing module, decorator or class
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ModuleNotFound { .. } | Self::DecoratorNotFound { .. } | Self::ClassNotFound { .. }
        )
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        use error_codes::*;

        match self {
            Self::ModuleNotFound { .. }
            | Self::DecoratorNotFound { .. }
            | Self::ClassNotFound { .. } => E1006_RESOURCE_NOT_FOUND,
            Self::Parse { .. } => E1009_PARSE_ERROR,
            Self::Emit { .. } => E1000_INTERNAL_ERROR,
            Self::Config { .. } | Self::InvalidInput { .. } => E1001_INVALID_REQUEST,
            Self::Io(_) => E1002_FILE_ERROR,
        }
    }
}

/// Result type alias for convenience
pub type NgResult<T> = Result<T, NgError>;

// ============================================================================
// Standardized Error Report
// ============================================================================

/// Standardized error codes for reports
pub mod error_codes {
    /// Internal error
    pub const E1000_INTERNAL_ERROR: &str = "E1000";
    /// Invalid request parameters or configuration
    pub const E1001_INVALID_REQUEST: &str = "E1001";
    /// File could not be read or written
    pub const E1002_FILE_ERROR: &str = "E1002";
    /// Resource not found
    pub const E1006_RESOURCE_NOT_FOUND: &str = "E1006";
    /// Source text could not be parsed
    pub const E1009_PARSE_ERROR: &str = "E1009";
}

/// Serializable error report for machine consumers (e.g. `--format json`)
///
/// # Example
/// ```rust
/// use ngmill_foundation::{ErrorReport, NgError};
///
/// let report = ErrorReport::from(&NgError::module_not_found("@angular/core"));
/// assert_eq!(report.code, "E1006");
/// assert_eq!(report.message, "Module @angular/core not found");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File the error relates to, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl ErrorReport {
    /// Attach the file the error relates to
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&NgError> for ErrorReport {
    fn from(err: &NgError) -> Self {
        let file = match err {
            NgError::Parse { file, .. } => Some(file.clone()),
            _ => None,
        };
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            file,
        }
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(file) = &self.file {
            write!(f, " ({})", file)?;
        }
        Ok(())
    }
}
