//! Error types for Sparkle

use thiserror::Error;

/// The main error type for Sparkle operations
#[derive(Debug, Error)]
pub enum SparkleError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported scene format: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid prim path: {0}")]
    InvalidPath(String),

    #[error("Duplicate prim: {0}")]
    DuplicatePrim(String),

    #[error("Parent prim not found for: {0}")]
    MissingParent(String),

    #[error("Invalid value type: {0}")]
    InvalidValueType(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Sparkle operations
pub type Result<T> = std::result::Result<T, SparkleError>;

impl From<toml::de::Error> for SparkleError {
    fn from(err: toml::de::Error) -> Self {
        SparkleError::TomlParseError(err.to_string())
    }
}
