//! The preset engine
//!
//! A [`Preset`] is an ordered list of [`Step`]s. Each step wraps one
//! [`Action`], an optional title, and any number of conditions evaluated
//! against the run's [`Configuration`] at execution time. Declaring a preset
//! performs no I/O; [`apply`] executes it against a target directory.

pub mod apply;
pub mod json;

pub use apply::{apply, ApplyOptions, Outcome, Report};

use crate::config::{ConfigValue, Configuration};
use crate::dependency::DependencyKind;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// A predicate over the configuration resolved so far
pub type Condition = Box<dyn Fn(&Configuration) -> bool>;

/// What to do when an extracted file already exists in the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Confirm with the user before overwriting
    #[default]
    Ask,
    Override,
    Skip,
}

/// Copy a template file into the target project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extract {
    pub file: String,
    /// Directory (relative to the target) to place the file in
    pub to: Option<String>,
    pub policy: ConflictPolicy,
}

impl Extract {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            to: None,
            policy: ConflictPolicy::default(),
        }
    }

    pub fn to(mut self, dir: impl Into<String>) -> Self {
        self.to = Some(dir.into());
        self
    }

    pub fn when_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Destination path relative to the target directory
    pub fn destination(&self) -> PathBuf {
        let file_name = self.file.rsplit('/').next().unwrap_or(&self.file);
        match &self.to {
            Some(dir) => PathBuf::from(dir.trim_end_matches('/')).join(file_name),
            None => PathBuf::from(&self.file),
        }
    }
}

/// Deep-merge a JSON patch into a file in the target project
#[derive(Debug, Clone, PartialEq)]
pub struct EditJson {
    pub path: String,
    pub patch: Value,
}

impl EditJson {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            patch: Value::Object(Default::default()),
        }
    }

    pub fn merge(mut self, patch: Value) -> Self {
        json::deep_merge(&mut self.patch, patch);
        self
    }
}

/// Post-run guidance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruct {
    pub text: String,
    pub heading: Option<String>,
}

impl Instruct {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            heading: None,
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }
}

/// A single declared operation
#[derive(Debug)]
pub enum Action {
    /// Interactive yes/no prompt stored under `key`
    Confirm {
        key: String,
        message: String,
        default: bool,
    },
    /// Interactive free-text prompt stored under `key`
    Input {
        key: String,
        message: String,
        default: String,
    },
    /// Flag-driven option stored under `key`, falling back to `default`
    Option { key: String, default: ConfigValue },
    Extract(Extract),
    EditJson(EditJson),
    AddDependency {
        name: String,
        version: String,
        kind: DependencyKind,
    },
    Instruct(Instruct),
    Group(Vec<Step>),
}

impl From<Extract> for Action {
    fn from(extract: Extract) -> Self {
        Action::Extract(extract)
    }
}

impl From<EditJson> for Action {
    fn from(edit: EditJson) -> Self {
        Action::EditJson(edit)
    }
}

impl From<Instruct> for Action {
    fn from(instruct: Instruct) -> Self {
        Action::Instruct(instruct)
    }
}

/// An action with its title and conditions
pub struct Step {
    action: Action,
    title: Option<String>,
    conditions: Vec<Condition>,
}

impl Step {
    fn new(action: Action) -> Self {
        Self {
            action,
            title: None,
            conditions: Vec::new(),
        }
    }

    pub fn with_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn without_title(&mut self) -> &mut Self {
        self.title = None;
        self
    }

    /// Add a condition; the step runs only when every condition holds
    pub fn when(&mut self, condition: impl Fn(&Configuration) -> bool + 'static) -> &mut Self {
        self.conditions.push(Box::new(condition));
        self
    }

    pub fn if_interactive(&mut self) -> &mut Self {
        self.when(Configuration::is_interactive)
    }

    pub fn if_not_interactive(&mut self) -> &mut Self {
        self.when(|config| !config.is_interactive())
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_enabled(&self, config: &Configuration) -> bool {
        self.conditions.iter().all(|condition| condition(config))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("action", &self.action)
            .field("title", &self.title)
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

/// An ordered, declarative list of steps
#[derive(Debug, Default)]
pub struct Preset {
    name: Option<String>,
    steps: Vec<Step>,
}

impl Preset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Append a step and return it for titling and gating
    pub fn add(&mut self, action: impl Into<Action>) -> &mut Step {
        self.steps.push(Step::new(action.into()));
        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    /// Collect the steps declared by `declare` into a single group step
    pub fn group(&mut self, declare: impl FnOnce(&mut Preset)) -> &mut Step {
        let mut group = Preset::new();
        declare(&mut group);
        self.add(Action::Group(group.steps))
    }

    pub fn extract(&mut self, file: impl Into<String>) -> &mut Step {
        self.add(Extract::new(file))
    }

    pub fn edit_json(&mut self, path: impl Into<String>, patch: Value) -> &mut Step {
        self.add(EditJson::new(path).merge(patch))
    }

    pub fn confirm(&mut self, key: &str, message: &str, default: bool) -> &mut Step {
        self.add(Action::Confirm {
            key: key.to_string(),
            message: message.to_string(),
            default,
        })
    }

    pub fn input(&mut self, key: &str, message: &str, default: &str) -> &mut Step {
        self.add(Action::Input {
            key: key.to_string(),
            message: message.to_string(),
            default: default.to_string(),
        })
    }

    pub fn option(&mut self, key: &str, default: ConfigValue) -> &mut Step {
        self.add(Action::Option {
            key: key.to_string(),
            default,
        })
    }

    pub fn add_dependency(&mut self, name: &str, version: &str) -> &mut Step {
        self.dependency(name, version, DependencyKind::Plain)
    }

    pub fn add_dev_dependency(&mut self, name: &str, version: &str) -> &mut Step {
        self.dependency(name, version, DependencyKind::Dev)
    }

    pub fn add_peer_dependency(&mut self, name: &str, version: &str) -> &mut Step {
        self.dependency(name, version, DependencyKind::Peer)
    }

    fn dependency(&mut self, name: &str, version: &str, kind: DependencyKind) -> &mut Step {
        self.add(Action::AddDependency {
            name: name.to_string(),
            version: version.to_string(),
            kind,
        })
    }

    pub fn instruct(&mut self, text: impl Into<String>) -> &mut Step {
        self.add(Instruct::new(text))
    }

    /// Every template an extract step may read, in declaration order
    pub fn required_templates(&self) -> Vec<&str> {
        fn collect<'a>(steps: &'a [Step], out: &mut Vec<&'a str>) {
            for step in steps {
                match &step.action {
                    Action::Extract(extract) => {
                        if !out.contains(&extract.file.as_str()) {
                            out.push(&extract.file);
                        }
                    }
                    Action::Group(nested) => collect(nested, out),
                    _ => {}
                }
            }
        }

        let mut templates = Vec::new();
        collect(&self.steps, &mut templates);
        templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use serde_json::json;

    #[test]
    fn test_extract_destination() {
        assert_eq!(
            Extract::new("jest.config.json").destination(),
            PathBuf::from("jest.config.json")
        );
        assert_eq!(
            Extract::new("index.spec.js").to("src/routes/").destination(),
            PathBuf::from("src/routes/index.spec.js")
        );
    }

    #[test]
    fn test_step_conditions_all_must_hold() {
        let mut preset = Preset::new();
        preset
            .extract("index.spec.ts")
            .when(|c| c.enabled("examples"))
            .when(|c| c.enabled("ts"));

        let step = &preset.steps()[0];
        let mut config = Configuration::new(Mode::NonInteractive);
        config.set_option("examples", ConfigValue::Bool(true));
        assert!(!step.is_enabled(&config));

        config.set_option("ts", ConfigValue::Bool(true));
        assert!(step.is_enabled(&config));
    }

    #[test]
    fn test_if_interactive() {
        let mut preset = Preset::new();
        preset.confirm("ts", "Enable TypeScript support?", false).if_interactive();
        preset.option("ts", ConfigValue::Bool(false)).if_not_interactive();

        let interactive = Configuration::new(Mode::Interactive);
        let flags = Configuration::new(Mode::NonInteractive);
        assert!(preset.steps()[0].is_enabled(&interactive));
        assert!(!preset.steps()[0].is_enabled(&flags));
        assert!(!preset.steps()[1].is_enabled(&interactive));
        assert!(preset.steps()[1].is_enabled(&flags));
    }

    #[test]
    fn test_group_nests_steps() {
        let mut preset = Preset::new();
        preset
            .group(|group| {
                group.add_dev_dependency("jest", "^26.6.0");
                group.add(Extract::new("index.spec.js").to("src/routes"));
            })
            .with_title("Adding required dependencies");

        assert_eq!(preset.steps().len(), 1);
        assert_eq!(preset.steps()[0].title(), Some("Adding required dependencies"));
        match preset.steps()[0].action() {
            Action::Group(steps) => assert_eq!(steps.len(), 2),
            other => panic!("expected group, got {:?}", other),
        }
        assert_eq!(preset.required_templates(), vec!["index.spec.js"]);
    }

    #[test]
    fn test_edit_json_accumulates_patches() {
        let edit = EditJson::new("package.json")
            .merge(json!({"scripts": {"test": "jest"}}))
            .merge(json!({"scripts": {"test:watch": "jest --watch"}}));
        assert_eq!(
            edit.patch,
            json!({"scripts": {"test": "jest", "test:watch": "jest --watch"}})
        );
    }
}
