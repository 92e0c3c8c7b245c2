//! Error taxonomy for rendering and loading variant documents.
//!
//! Builder operations never fail; only the document I/O surface does.

/// Errors produced while rendering, parsing or loading a variant document.
#[derive(Debug, thiserror::Error)]
pub enum VariantError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid expansion argument: {0}")]
    InvalidExpansion(String),

    #[error("invalid display task argument: {0}")]
    InvalidDisplayTask(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("toml render error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for variant document operations.
pub type Result<T> = std::result::Result<T, VariantError>;
