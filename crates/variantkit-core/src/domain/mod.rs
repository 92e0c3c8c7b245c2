//! Domain models for build variant documents.
//!
//! - `Variant`: one build environment's CI configuration and its builder
//! - `TaskSpec`: how one named task runs within a variant
//! - `DisplayTaskDefinition`: display grouping of executed tasks

pub mod error;
pub mod task_spec;
pub mod variant;

pub use error::{Result, VariantError};
pub use task_spec::{DisplayTaskDefinition, TaskSpec};
pub use variant::{Expansions, Variant};

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` as the type's zero value, the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
