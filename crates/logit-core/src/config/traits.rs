//! Options source trait

use crate::types::OptionsLayer;

/// A source of writer options
///
/// Implementations:
/// - `MemoryOptionsSource`: In-memory layer for tests and programmatic defaults
/// - `FileOptionsSource`: YAML or JSON file (~/.config/logit/config.yaml)
/// - `EnvOptionsSource`: `LOGIT_*` environment variables
pub trait OptionsSource: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Read the layer this source contributes
    ///
    /// A source with nothing to say returns an empty layer, not an error.
    fn layer(&self) -> ConfigResult<OptionsLayer>;
}

/// Errors that can occur while resolving options
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Invalid option combination: {0}")]
    InvalidCombination(String),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }

    /// Create an invalid combination error
    pub fn invalid_combination(message: impl Into<String>) -> Self {
        Self::InvalidCombination(message.into())
    }

    /// Create a parse error for a file
    pub fn parse(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
