//! Build variant document and its fluent builder.
//!
//! Every mutator takes `&mut self` and hands back the same receiver, so
//! calls chain without ever allocating a new `Variant`:
//!
//! ```
//! use variantkit_core::{DisplayTaskDefinition, Variant};
//!
//! let mut variant = Variant::new();
//! variant
//!     .name("ubuntu1604")
//!     .run_on("ubuntu1604")
//!     .add_tasks(["compile", "test"])
//!     .expansion("goos", "linux")
//!     .display_tasks([DisplayTaskDefinition::new("all", ["compile", "test"])]);
//!
//! assert_eq!(variant.task_specs.len(), 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::null_as_default;
use super::task_spec::{DisplayTaskDefinition, TaskSpec};

/// Expansion variables, keyed by name. Values may be any JSON-shaped data.
pub type Expansions = BTreeMap<String, serde_json::Value>;

/// One build environment's worth of CI configuration.
///
/// Optional booleans use `None` for "inherit the project default" and are
/// omitted from rendered documents; `Some(false)` is an explicit override.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Variant {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    /// Scheduling interval in seconds. Zero leaves the system default.
    #[serde(rename = "batchtime", skip_serializing_if = "is_zero")]
    pub batch_time_secs: i64,

    /// Cron expression. Not reconciled with `batch_time_secs`.
    #[serde(rename = "cron", skip_serializing_if = "String::is_empty")]
    pub cron_batch_time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stepback: Option<bool>,

    #[serde(
        rename = "tasks",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub task_specs: Vec<TaskSpec>,

    /// Distros this variant runs on. The builder only ever writes one entry.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub run_on: Vec<String>,

    #[serde(skip_serializing_if = "is_unset_or_empty")]
    pub expansions: Option<Expansions>,

    #[serde(
        rename = "display_tasks",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub display_task_specs: Vec<DisplayTaskDefinition>,

    /// `Some(false)` keeps the variant from being activated initially.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activate: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patchable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_for_git_tag: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_tag_only: Option<bool>,
}

impl Variant {
    /// Create an empty variant.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&mut self, id: impl Into<String>) -> &mut Self {
        self.name = id.into();
        self
    }

    pub fn display_name(&mut self, id: impl Into<String>) -> &mut Self {
        self.display_name = id.into();
        self
    }

    /// Set the batch interval in seconds. Zero is written as-is.
    pub fn batch_time(&mut self, batch_time_secs: i64) -> &mut Self {
        self.batch_time_secs = batch_time_secs;
        self
    }

    /// Set the cron expression. An empty string clears it.
    pub fn set_cron_batch_time(&mut self, batch_time: impl Into<String>) -> &mut Self {
        self.cron_batch_time = batch_time.into();
        self
    }

    pub fn set_stepback(&mut self, stepback: Option<bool>) -> &mut Self {
        self.stepback = stepback;
        self
    }

    pub fn set_activate(&mut self, activate: Option<bool>) -> &mut Self {
        self.activate = activate;
        self
    }

    pub fn set_disable(&mut self, disable: Option<bool>) -> &mut Self {
        self.disable = disable;
        self
    }

    pub fn set_patchable(&mut self, patchable: Option<bool>) -> &mut Self {
        self.patchable = patchable;
        self
    }

    pub fn set_patch_only(&mut self, patch_only: Option<bool>) -> &mut Self {
        self.patch_only = patch_only;
        self
    }

    pub fn set_allow_for_git_tag(&mut self, allow: Option<bool>) -> &mut Self {
        self.allow_for_git_tag = allow;
        self
    }

    pub fn set_git_tag_only(&mut self, git_tag_only: Option<bool>) -> &mut Self {
        self.git_tag_only = git_tag_only;
        self
    }

    /// Run on a single distro, replacing any previous run-on list.
    pub fn run_on(&mut self, distro: impl Into<String>) -> &mut Self {
        self.run_on = vec![distro.into()];
        self
    }

    /// Append a fully formed task spec. Duplicate names are kept.
    pub fn task_spec(&mut self, spec: TaskSpec) -> &mut Self {
        self.task_specs.push(spec);
        self
    }

    /// Append one name-only task spec per non-empty name, in order.
    ///
    /// Repeated names each produce their own entry.
    pub fn add_tasks<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if name.is_empty() {
                trace!(variant = %self.name, "skipping empty task name");
                continue;
            }
            self.task_specs.push(TaskSpec::new(name));
        }
        self
    }

    /// Replace the expansions mapping wholesale. `None` clears it.
    pub fn set_expansions(&mut self, expansions: Option<Expansions>) -> &mut Self {
        self.expansions = expansions;
        self
    }

    /// Insert or overwrite one expansion, leaving other keys untouched.
    pub fn expansion(
        &mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> &mut Self {
        self.expansions
            .get_or_insert_with(Expansions::new)
            .insert(key.into(), value.into());
        self
    }

    /// Append display task definitions in the order given.
    pub fn display_tasks<I>(&mut self, definitions: I) -> &mut Self
    where
        I: IntoIterator<Item = DisplayTaskDefinition>,
    {
        self.display_task_specs.extend(definitions);
        self
    }

    /// Names of the task specs, in declaration order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.task_specs.iter().map(|spec| spec.name.as_str())
    }

    /// Whether every field is still at its zero value, i.e. the variant
    /// would render as an empty document.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.display_name.is_empty()
            && self.batch_time_secs == 0
            && self.cron_batch_time.is_empty()
            && self.task_specs.is_empty()
            && self.run_on.is_empty()
            && is_unset_or_empty(&self.expansions)
            && self.display_task_specs.is_empty()
            && [
                self.stepback,
                self.activate,
                self.disable,
                self.patchable,
                self.patch_only,
                self.allow_for_git_tag,
                self.git_tag_only,
            ]
            .iter()
            .all(Option::is_none)
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_unset_or_empty(expansions: &Option<Expansions>) -> bool {
    expansions.as_ref().map_or(true, BTreeMap::is_empty)
}
