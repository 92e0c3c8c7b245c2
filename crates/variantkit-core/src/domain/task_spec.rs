//! Per-variant task references and display task groupings.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// How one named task runs within a variant.
///
/// `stepback` is a plain flag: `false` means "no override" and is omitted
/// from rendered documents. `activate` keeps the unset/true/false states.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSpec {
    /// Task name. May be empty while the spec is being assembled.
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub stepback: bool,

    /// Distros overriding the variant's `run_on` for this task only.
    #[serde(
        rename = "distros",
        alias = "distro",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub distro: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activate: Option<bool>,
}

impl TaskSpec {
    /// Create a task spec with only the name populated.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_stepback(&mut self, stepback: bool) -> &mut Self {
        self.stepback = stepback;
        self
    }

    /// Replace the distro override list wholesale.
    pub fn set_distro<I, S>(&mut self, distros: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.distro = distros.into_iter().map(Into::into).collect();
        self
    }

    /// Override the variant-level activation for this task. `None` inherits.
    pub fn set_activate(&mut self, activate: Option<bool>) -> &mut Self {
        self.activate = activate;
        self
    }
}

/// Groups several executed tasks under one display name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayTaskDefinition {
    pub name: String,

    /// Underlying task names that roll up into this display task.
    #[serde(rename = "execution_tasks", default, deserialize_with = "null_as_default")]
    pub components: Vec<String>,
}

impl DisplayTaskDefinition {
    pub fn new<I, S>(name: impl Into<String>, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_spec_defaults() {
        let spec = TaskSpec::default();
        assert!(spec.name.is_empty());
        assert!(!spec.stepback);
        assert!(spec.distro.is_empty());
        assert!(spec.activate.is_none());
    }

    #[test]
    fn test_set_name_overwrites_and_chains() {
        let mut spec = TaskSpec::new("compile");
        let ptr: *const TaskSpec = &spec;
        let returned = spec.set_name("test");
        assert!(std::ptr::eq(returned, ptr));
        assert_eq!(spec.name, "test");
    }

    #[test]
    fn test_set_stepback() {
        let mut spec = TaskSpec::default();
        let ptr: *const TaskSpec = &spec;
        assert!(std::ptr::eq(spec.set_stepback(true), ptr));
        assert!(spec.stepback);

        spec.set_stepback(false);
        assert!(!spec.stepback);
    }

    #[test]
    fn test_set_distro_replaces_list() {
        let mut spec = TaskSpec::default();
        spec.set_distro(["rhel70", "ubuntu1604"]);
        assert_eq!(spec.distro, vec!["rhel70", "ubuntu1604"]);

        let ptr: *const TaskSpec = &spec;
        let returned = spec.set_distro(vec!["windows-64".to_string()]);
        assert!(std::ptr::eq(returned, ptr));
        assert_eq!(spec.distro, vec!["windows-64"]);

        spec.set_distro(Vec::<String>::new());
        assert!(spec.distro.is_empty());
    }

    #[test]
    fn test_set_activate_tri_state() {
        let mut spec = TaskSpec::default();
        assert_eq!(spec.activate, None);

        let ptr: *const TaskSpec = &spec;
        assert!(std::ptr::eq(spec.set_activate(Some(true)), ptr));
        assert_eq!(spec.activate, Some(true));

        spec.set_activate(Some(false));
        assert_eq!(spec.activate, Some(false));

        spec.set_activate(None);
        assert_eq!(spec.activate, None);
    }

    #[test]
    fn test_task_spec_chain() {
        let mut spec = TaskSpec::default();
        spec.set_name("lint")
            .set_stepback(true)
            .set_distro(["archlinux"])
            .set_activate(Some(false));

        assert_eq!(
            spec,
            TaskSpec {
                name: "lint".to_string(),
                stepback: true,
                distro: vec!["archlinux".to_string()],
                activate: Some(false),
            }
        );
    }

    #[test]
    fn test_task_spec_minimal_json() {
        let value = serde_json::to_value(TaskSpec::new("compile")).expect("serialize");
        assert_eq!(value, json!({ "name": "compile" }));

        let mut spec = TaskSpec::new("compile");
        spec.set_stepback(true)
            .set_distro(["rhel70"])
            .set_activate(Some(false));
        let value = serde_json::to_value(&spec).expect("serialize");
        assert_eq!(
            value,
            json!({
                "name": "compile",
                "stepback": true,
                "distros": ["rhel70"],
                "activate": false,
            })
        );
    }

    #[test]
    fn test_task_spec_accepts_legacy_distro_key() {
        let spec: TaskSpec =
            serde_json::from_value(json!({ "name": "t", "distro": ["rhel70"] })).expect("parse");
        assert_eq!(spec.distro, vec!["rhel70"]);
    }

    #[test]
    fn test_display_task_serializes_execution_tasks() {
        let def = DisplayTaskDefinition::new("all", ["compile", "test"]);
        let value = serde_json::to_value(&def).expect("serialize");
        assert_eq!(
            value,
            json!({ "name": "all", "execution_tasks": ["compile", "test"] })
        );

        // Both keys are always emitted, even when empty.
        let empty = serde_json::to_value(DisplayTaskDefinition::default()).expect("serialize");
        assert_eq!(empty, json!({ "name": "", "execution_tasks": [] }));
    }
}
