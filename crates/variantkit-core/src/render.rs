//! Rendering variant documents to interchange formats.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use crate::domain::error::{Result, VariantError};
use crate::domain::variant::Variant;

/// Interchange formats a variant document can be rendered to or loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yml",
            DocumentFormat::Toml => "toml",
        }
    }

    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                VariantError::UnsupportedFormat(format!("no file extension on {:?}", path))
            })?;
        ext.parse()
    }
}

impl FromStr for DocumentFormat {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "toml" => Ok(DocumentFormat::Toml),
            other => Err(VariantError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Toml => "toml",
        };
        f.write_str(name)
    }
}

/// Render a variant in its minimal form: unset and zero-valued fields are
/// left out.
///
/// TOML has no null; a `null` expansion value is a `TomlSer` error there.
/// Batch times fit TOML's signed 64-bit integers.
pub fn render(variant: &Variant, format: DocumentFormat) -> Result<String> {
    debug!(variant = %variant.name, %format, "rendering variant");
    let rendered = match format {
        DocumentFormat::Json => {
            let mut out = serde_json::to_string_pretty(variant)?;
            out.push('\n');
            out
        }
        DocumentFormat::Yaml => serde_yaml::to_string(variant)?,
        DocumentFormat::Toml => toml::to_string_pretty(variant)?,
    };
    Ok(rendered)
}

/// Render a variant and write it to `path`.
pub fn write_variant(path: &Path, variant: &Variant, format: DocumentFormat) -> Result<()> {
    let content = render(variant, format)?;
    std::fs::write(path, content)?;
    info!(path = %path.display(), %format, "wrote variant document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task_spec::{DisplayTaskDefinition, TaskSpec};
    use serde_json::json;
    use std::path::PathBuf;

    fn sample_variant() -> Variant {
        let mut variant = Variant::new();
        variant
            .name("ubuntu1604")
            .run_on("ubuntu1604")
            .add_tasks(["compile", "test"])
            .expansion("goos", "linux")
            .display_tasks([DisplayTaskDefinition::new("all", ["compile", "test"])]);
        variant
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<DocumentFormat>().unwrap(), DocumentFormat::Json);
        assert_eq!("YAML".parse::<DocumentFormat>().unwrap(), DocumentFormat::Yaml);
        assert_eq!("yml".parse::<DocumentFormat>().unwrap(), DocumentFormat::Yaml);
        assert_eq!("toml".parse::<DocumentFormat>().unwrap(), DocumentFormat::Toml);
        assert!(matches!(
            "ini".parse::<DocumentFormat>(),
            Err(VariantError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        let format = DocumentFormat::from_path(&PathBuf::from("variants/ubuntu.yaml")).unwrap();
        assert_eq!(format, DocumentFormat::Yaml);

        let format = DocumentFormat::from_path(&PathBuf::from("variant.JSON")).unwrap();
        assert_eq!(format, DocumentFormat::Json);

        assert!(DocumentFormat::from_path(&PathBuf::from("Makefile")).is_err());
    }

    #[test]
    fn test_format_display_and_extension() {
        assert_eq!(DocumentFormat::Yaml.to_string(), "yaml");
        assert_eq!(DocumentFormat::Yaml.extension(), "yml");
        assert_eq!(DocumentFormat::default(), DocumentFormat::Json);
    }

    #[test]
    fn test_render_json_minimal_shape() {
        let rendered = render(&sample_variant(), DocumentFormat::Json).unwrap();
        assert!(rendered.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "ubuntu1604",
                "run_on": ["ubuntu1604"],
                "tasks": [{ "name": "compile" }, { "name": "test" }],
                "expansions": { "goos": "linux" },
                "display_tasks": [
                    { "name": "all", "execution_tasks": ["compile", "test"] }
                ],
            })
        );
    }

    #[test]
    fn test_render_yaml_omits_unset_flags() {
        let mut variant = sample_variant();
        variant.set_patch_only(Some(false));

        let rendered = render(&variant, DocumentFormat::Yaml).unwrap();
        assert!(rendered.contains("name: ubuntu1604"));
        assert!(rendered.contains("patch_only: false"));
        assert!(!rendered.contains("activate"));
        assert!(!rendered.contains("batchtime"));
    }

    #[test]
    fn test_render_toml() {
        let mut variant = sample_variant();
        variant
            .batch_time(600)
            .task_spec(TaskSpec::new("lint").set_stepback(true).clone());

        let rendered = render(&variant, DocumentFormat::Toml).unwrap();
        assert!(rendered.contains("name = \"ubuntu1604\""));
        assert!(rendered.contains("batchtime = 600"));
        assert!(rendered.contains("[[tasks]]"));
    }

    #[test]
    fn test_render_toml_batch_time_extremes() {
        let mut variant = Variant::new();
        variant.batch_time(i64::MAX);

        let rendered = render(&variant, DocumentFormat::Toml).unwrap();
        assert!(rendered.contains(&format!("batchtime = {}", i64::MAX)));

        let loaded = crate::load::parse_variant(&rendered, DocumentFormat::Toml).unwrap();
        assert_eq!(loaded.batch_time_secs, i64::MAX);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let variant = sample_variant();
        let before = variant.clone();
        render(&variant, DocumentFormat::Yaml).unwrap();
        assert_eq!(variant, before);
    }
}
