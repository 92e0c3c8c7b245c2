//! Loading variant documents from text and files.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::error::Result;
use crate::domain::variant::Variant;
use crate::render::DocumentFormat;

/// Parse a variant document. Missing fields take their zero values.
pub fn parse_variant(content: &str, format: DocumentFormat) -> Result<Variant> {
    debug!(%format, bytes = content.len(), "parsing variant document");
    let variant: Variant = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        DocumentFormat::Toml => toml::from_str(content)?,
    };
    Ok(variant)
}

/// Load a variant document, picking the format from the file extension.
pub fn load_variant(path: &Path) -> Result<Variant> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let variant = parse_variant(&content, format)?;
    info!(
        path = %path.display(),
        variant = %variant.name,
        tasks = variant.task_specs.len(),
        "loaded variant document"
    );
    Ok(variant)
}
