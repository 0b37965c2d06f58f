//! Executes a declared preset against a target directory

use super::{json, Action, ConflictPolicy, EditJson, Extract, Instruct, Preset, Step};
use crate::config::{ConfigValue, Configuration};
use crate::dependency::DependencyKind;
use crate::error::{PresetError, Result};
use crate::interaction::Interaction;
use crate::templates::TemplateSource;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Something a step did; paths are relative to the target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved { key: String, value: ConfigValue },
    Extracted(PathBuf),
    /// The file existed and was not overwritten
    Kept(PathBuf),
    Merged(PathBuf),
    DependencyAdded {
        name: String,
        version: String,
        kind: DependencyKind,
    },
    Instructed,
}

/// Where and how to apply a preset
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub target_dir: PathBuf,
    pub configuration: Configuration,
    /// Overwrite conflicting files without asking when not interactive
    pub assume_yes: bool,
}

impl ApplyOptions {
    pub fn new(target_dir: impl Into<PathBuf>, configuration: Configuration) -> Self {
        Self {
            target_dir: target_dir.into(),
            configuration,
            assume_yes: false,
        }
    }

    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }
}

/// The result of a completed run
#[derive(Debug)]
pub struct Report {
    pub configuration: Configuration,
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn extracted(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::Extracted(path) => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    pub fn dependencies(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::DependencyAdded { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Run every enabled step of `preset`, in declaration order
pub fn apply<I: Interaction + ?Sized>(
    preset: &Preset,
    templates: &TemplateSource,
    options: ApplyOptions,
    ui: &mut I,
) -> Result<Report> {
    let mut applier = Applier {
        target_dir: &options.target_dir,
        templates,
        ui,
        config: options.configuration.clone(),
        assume_yes: options.assume_yes,
        outcomes: Vec::new(),
    };
    applier.run_steps(preset.steps())?;

    Ok(Report {
        configuration: applier.config,
        outcomes: applier.outcomes,
    })
}

struct Applier<'a, I: Interaction + ?Sized> {
    target_dir: &'a Path,
    templates: &'a TemplateSource,
    ui: &'a mut I,
    config: Configuration,
    assume_yes: bool,
    outcomes: Vec<Outcome>,
}

impl<I: Interaction + ?Sized> Applier<'_, I> {
    fn run_steps(&mut self, steps: &[Step]) -> Result<()> {
        for step in steps {
            // Conditions see values resolved by earlier steps
            if !step.is_enabled(&self.config) {
                continue;
            }
            if let Some(title) = step.title() {
                self.ui.step(title).map_err(PresetError::Prompt)?;
            }
            self.run_action(step.action())?;
        }
        Ok(())
    }

    fn run_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Confirm {
                key,
                message,
                default,
            } => {
                let answer = self
                    .ui
                    .confirm(message, *default)
                    .map_err(PresetError::Prompt)?;
                self.resolve_prompt(key, ConfigValue::Bool(answer));
            }
            Action::Input {
                key,
                message,
                default,
            } => {
                let answer = self
                    .ui
                    .input(message, default)
                    .map_err(PresetError::Prompt)?;
                self.resolve_prompt(key, ConfigValue::text(answer));
            }
            Action::Option { key, default } => {
                let value = self.config.flag(key).unwrap_or(default).clone();
                self.config.set_option(key, value.clone());
                self.outcomes.push(Outcome::Resolved {
                    key: key.clone(),
                    value,
                });
            }
            Action::Extract(extract) => self.extract(extract)?,
            Action::EditJson(edit) => self.edit_json(edit)?,
            Action::AddDependency {
                name,
                version,
                kind,
            } => self.add_dependency(name, version, *kind)?,
            Action::Instruct(instruct) => self.instruct(instruct)?,
            Action::Group(steps) => self.run_steps(steps)?,
        }
        Ok(())
    }

    fn resolve_prompt(&mut self, key: &str, value: ConfigValue) {
        self.config.set_prompt(key, value.clone());
        self.outcomes.push(Outcome::Resolved {
            key: key.to_string(),
            value,
        });
    }

    fn extract(&mut self, extract: &Extract) -> Result<()> {
        let relative = extract.destination();
        let target = self.target_dir.join(&relative);
        let contents = self.templates.read(&extract.file)?;

        if target.exists() && !self.should_overwrite(extract.policy, &relative)? {
            self.ui
                .warning(&format!("Kept existing {}", relative.display()))
                .map_err(PresetError::Prompt)?;
            self.outcomes.push(Outcome::Kept(relative));
            return Ok(());
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PresetError::io(parent, e))?;
        }
        std::fs::write(&target, contents).map_err(|e| PresetError::io(&target, e))?;

        self.outcomes.push(Outcome::Extracted(relative));
        Ok(())
    }

    fn should_overwrite(&mut self, policy: ConflictPolicy, relative: &Path) -> Result<bool> {
        match policy {
            ConflictPolicy::Override => Ok(true),
            ConflictPolicy::Skip => Ok(false),
            ConflictPolicy::Ask if self.config.is_interactive() => self
                .ui
                .confirm(
                    &format!("{} already exists. Overwrite it?", relative.display()),
                    false,
                )
                .map_err(PresetError::Prompt),
            ConflictPolicy::Ask => Ok(self.assume_yes),
        }
    }

    fn edit_json(&mut self, edit: &EditJson) -> Result<()> {
        let path = self.target_dir.join(&edit.path);
        json::merge_file(&path, &edit.patch)?;
        self.outcomes.push(Outcome::Merged(PathBuf::from(&edit.path)));
        Ok(())
    }

    fn add_dependency(&mut self, name: &str, version: &str, kind: DependencyKind) -> Result<()> {
        let manifest = self.target_dir.join("package.json");
        if !manifest.is_file() {
            return Err(PresetError::ManifestNotFound {
                dir: self.target_dir.to_path_buf(),
            });
        }

        json::update_file(&manifest, |package| {
            let section = package
                .entry(kind.manifest_section())
                .or_insert_with(|| Value::Object(Default::default()));
            if !section.is_object() {
                *section = Value::Object(Default::default());
            }
            if let Value::Object(entries) = section {
                entries.insert(name.to_string(), Value::String(version.to_string()));
            }
        })?;

        self.outcomes.push(Outcome::DependencyAdded {
            name: name.to_string(),
            version: version.to_string(),
            kind,
        });
        Ok(())
    }

    fn instruct(&mut self, instruct: &Instruct) -> Result<()> {
        self.ui
            .instruct(instruct.heading.as_deref().unwrap_or_default(), &instruct.text)
            .map_err(PresetError::Prompt)?;
        self.outcomes.push(Outcome::Instructed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::interaction::Scripted;
    use crate::templates::EmbeddedTemplate;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    const TEMPLATES: &[EmbeddedTemplate] = &[
        EmbeddedTemplate::new("jest.config.json", "{\"testEnvironment\": \"jsdom\"}\n"),
        EmbeddedTemplate::new("index.spec.js", "test('renders', () => {});\n"),
    ];

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "app", "devDependencies": {"svelte": "^3.0.0"}}"#,
        )
        .unwrap();
        dir
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    fn flagged_preset() -> Preset {
        let mut preset = Preset::new();
        preset
            .confirm("ts", "Enable TypeScript support?", false)
            .if_interactive();
        preset
            .option("ts", ConfigValue::Bool(false))
            .if_not_interactive();
        preset
            .add_dev_dependency("ts-jest", "^26.5.0")
            .when(|c| c.enabled("ts"));
        preset
    }

    #[test]
    fn test_non_interactive_uses_flags_not_prompts() {
        let dir = project();
        let flags = HashMap::from([("ts".to_string(), ConfigValue::Bool(true))]);
        let config = Configuration::new(Mode::NonInteractive).with_flags(flags);
        let mut ui = Scripted::new();

        let report = apply(
            &flagged_preset(),
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), config),
            &mut ui,
        )
        .unwrap();

        assert!(ui.shown("confirm").is_empty());
        assert_eq!(report.configuration.get("ts"), Some(&ConfigValue::Bool(true)));
        assert_eq!(report.dependencies(), vec!["ts-jest"]);
    }

    #[test]
    fn test_non_interactive_falls_back_to_default() {
        let dir = project();
        let mut ui = Scripted::new();

        let report = apply(
            &flagged_preset(),
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::new(Mode::NonInteractive)),
            &mut ui,
        )
        .unwrap();

        assert!(report.dependencies().is_empty());
        assert_eq!(
            read_json(&dir.path().join("package.json")),
            json!({"name": "app", "devDependencies": {"svelte": "^3.0.0"}})
        );
    }

    #[test]
    fn test_interactive_uses_prompt_answer() {
        let dir = project();
        // Flags are ignored in interactive mode
        let flags = HashMap::from([("ts".to_string(), ConfigValue::Bool(false))]);
        let config = Configuration::new(Mode::Interactive).with_flags(flags);
        let mut ui = Scripted::new().confirm_with(true);

        let report = apply(
            &flagged_preset(),
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), config),
            &mut ui,
        )
        .unwrap();

        assert_eq!(ui.shown("confirm"), vec!["Enable TypeScript support?"]);
        assert_eq!(report.dependencies(), vec!["ts-jest"]);
        assert_eq!(
            read_json(&dir.path().join("package.json"))["devDependencies"],
            json!({"svelte": "^3.0.0", "ts-jest": "^26.5.0"})
        );
    }

    #[test]
    fn test_dependency_kinds_land_in_sections() {
        let dir = project();
        let mut preset = Preset::new();
        preset.add_dependency("svelte-kit", "^1.0.0");
        preset.add_peer_dependency("svelte", "^3.0.0");

        apply(
            &preset,
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::default()),
            &mut Scripted::new(),
        )
        .unwrap();

        let package = read_json(&dir.path().join("package.json"));
        assert_eq!(package["dependencies"], json!({"svelte-kit": "^1.0.0"}));
        assert_eq!(package["peerDependencies"], json!({"svelte": "^3.0.0"}));
    }

    #[test]
    fn test_missing_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut preset = Preset::new();
        preset.add_dev_dependency("jest", "^26.6.0");

        let err = apply(
            &preset,
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::default()),
            &mut Scripted::new(),
        )
        .unwrap_err();
        assert!(matches!(err, PresetError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_extract_to_directory() {
        let dir = project();
        let mut preset = Preset::new();
        preset
            .add(Extract::new("index.spec.js").to("src/routes/"))
            .with_title("Initializing example test file");

        let mut ui = Scripted::new();
        let report = apply(
            &preset,
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::default()),
            &mut ui,
        )
        .unwrap();

        assert_eq!(
            report.extracted(),
            vec![Path::new("src/routes/index.spec.js")]
        );
        assert!(dir.path().join("src/routes/index.spec.js").is_file());
        assert_eq!(ui.shown("step"), vec!["Initializing example test file"]);
    }

    #[test]
    fn test_ask_conflict_interactive_declined_keeps_file() {
        let dir = project();
        std::fs::write(dir.path().join("jest.config.json"), "{\"custom\": true}").unwrap();
        let mut preset = Preset::new();
        preset.extract("jest.config.json");

        let mut ui = Scripted::new().confirm_with(false);
        let report = apply(
            &preset,
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::new(Mode::Interactive)),
            &mut ui,
        )
        .unwrap();

        assert_eq!(
            ui.shown("confirm"),
            vec!["jest.config.json already exists. Overwrite it?"]
        );
        assert_eq!(
            report.outcomes,
            vec![Outcome::Kept(PathBuf::from("jest.config.json"))]
        );
        assert_eq!(
            read_json(&dir.path().join("jest.config.json")),
            json!({"custom": true})
        );
    }

    #[test]
    fn test_ask_conflict_non_interactive_respects_assume_yes() {
        let dir = project();
        std::fs::write(dir.path().join("jest.config.json"), "{}").unwrap();
        let mut preset = Preset::new();
        preset.extract("jest.config.json");

        let kept = apply(
            &preset,
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::default()),
            &mut Scripted::new(),
        )
        .unwrap();
        assert_eq!(kept.extracted().len(), 0);

        let overwritten = apply(
            &preset,
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::default()).assume_yes(true),
            &mut Scripted::new(),
        )
        .unwrap();
        assert_eq!(overwritten.extracted().len(), 1);
        assert_eq!(
            read_json(&dir.path().join("jest.config.json")),
            json!({"testEnvironment": "jsdom"})
        );
    }

    #[test]
    fn test_skip_and_override_policies() {
        let dir = project();
        std::fs::write(dir.path().join("jest.config.json"), "{}").unwrap();
        let mut preset = Preset::new();
        preset.add(Extract::new("jest.config.json").when_conflict(ConflictPolicy::Skip));
        preset.add(Extract::new("jest.config.json").when_conflict(ConflictPolicy::Override));

        let mut ui = Scripted::new();
        let report = apply(
            &preset,
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::new(Mode::Interactive)),
            &mut ui,
        )
        .unwrap();

        assert!(ui.shown("confirm").is_empty());
        assert_eq!(
            report.outcomes,
            vec![
                Outcome::Kept(PathBuf::from("jest.config.json")),
                Outcome::Extracted(PathBuf::from("jest.config.json")),
            ]
        );
    }

    #[test]
    fn test_group_condition_gates_nested_steps() {
        let dir = project();
        let mut preset = Preset::new();
        preset.option("examples", ConfigValue::Bool(false));
        preset
            .group(|group| {
                group.add(Extract::new("index.spec.js").to("src/routes"));
                group.instruct("Run the example");
            })
            .with_title("Examples")
            .when(|c| c.enabled("examples"));

        let mut ui = Scripted::new();
        let report = apply(
            &preset,
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::default()),
            &mut ui,
        )
        .unwrap();

        assert!(ui.shown("step").is_empty());
        assert!(report.extracted().is_empty());
        assert!(!dir.path().join("src/routes/index.spec.js").exists());
    }

    #[test]
    fn test_instruct_shows_heading() {
        let dir = project();
        let mut preset = Preset::new();
        preset.add(Instruct::new("Run npm install").with_heading("What's next?"));

        let mut ui = Scripted::new();
        apply(
            &preset,
            &TemplateSource::Embedded(TEMPLATES),
            ApplyOptions::new(dir.path(), Configuration::default()),
            &mut ui,
        )
        .unwrap();

        assert_eq!(ui.shown("instruct"), vec!["What's next? Run npm install"]);
    }
}
