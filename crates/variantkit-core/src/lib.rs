//! variantkit core library
//!
//! Builds CI build variant documents through a chainable, in-place API and
//! renders or loads them as JSON, YAML or TOML.

pub mod args;
pub mod domain;
pub mod load;
pub mod render;
pub mod telemetry;

pub use args::{parse_display_task_arg, parse_expansion_arg};
pub use domain::{DisplayTaskDefinition, Expansions, Result, TaskSpec, Variant, VariantError};
pub use load::{load_variant, parse_variant};
pub use render::{render, write_variant, DocumentFormat};
pub use telemetry::init_tracing;

/// variantkit version, reported by `variantkit --version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
