use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading validation inputs.
///
/// Per-item validation problems are never reported through this type; they
/// become [`crate::diagnostics::Diagnostic`]s on the item's result. This enum
/// covers the inputs a checker cannot run without.
#[derive(Error, Debug)]
pub enum MarketlintError {
    /// A required input (directory, schema, config file) does not exist.
    #[error("{kind} not found: {}", path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The schema document itself is not a usable JSON Schema.
    #[error("invalid schema: {message}")]
    Schema { message: String },

    /// A glob pattern could not be compiled.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Convenience alias for `Result<T, MarketlintError>`.
pub type Result<T> = std::result::Result<T, MarketlintError>;
