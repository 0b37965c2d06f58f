//! The adder contract
//!
//! An adder declares its configuration options and dependencies as static
//! tables, then issues its own ordered steps against a [`Preset`].

use crate::config::ConfigOption;
use crate::dependency::{Dependency, DependencyKind};
use crate::error::{PresetError, Result};
use crate::preset::{ConflictPolicy, Extract, Preset, Step};
use crate::templates::TemplateSource;
use std::collections::HashSet;

/// A scaffolding unit that adds one capability to a project
///
/// Each adder implements this trait to define:
/// - Its display name
/// - Configuration options, resolved by prompt or by flag
/// - Required dependencies, optionally gated on an option
/// - The templates it extracts
/// - Its own ordered steps
pub trait Adder {
    /// Display name, also used as the preset's name
    fn name(&self) -> &'static str;

    /// Configuration options, in prompt order
    fn configuration(&self) -> &[ConfigOption];

    /// Required dependencies, in install order
    fn dependencies(&self) -> &[Dependency];

    /// Where extracted templates come from
    fn templates(&self) -> TemplateSource;

    /// Declare adder-specific steps; runs after configuration and dependencies
    fn steps(&self, preset: &mut Preset);

    /// Declare the full preset: name, configuration, dependencies, then [`Adder::steps`]
    fn run(&self) -> Result<Preset> {
        let mut preset = Preset::new();
        initialise(self, &mut preset)?;
        self.steps(&mut preset);
        Ok(preset)
    }
}

/// Register the adder's name, configuration prompts/options and dependencies
pub fn initialise<A: Adder + ?Sized>(adder: &A, preset: &mut Preset) -> Result<()> {
    validate(adder)?;

    preset.set_name(adder.name());

    for option in adder.configuration() {
        configure(preset, option);
    }

    let dependencies = adder.dependencies();
    preset
        .group(|group| {
            for dependency in dependencies {
                let step = match dependency.kind {
                    DependencyKind::Dev => {
                        group.add_dev_dependency(dependency.name, dependency.version)
                    }
                    DependencyKind::Peer => {
                        group.add_peer_dependency(dependency.name, dependency.version)
                    }
                    DependencyKind::Plain => {
                        group.add_dependency(dependency.name, dependency.version)
                    }
                };
                if let Some(key) = dependency.relies_on {
                    step.when(move |config| config.enabled(key));
                }
            }
        })
        .with_title("Adding required dependencies");

    Ok(())
}

/// Extract a template, asking before overwriting an existing file
pub fn safe_extract<'p>(preset: &'p mut Preset, title: &str, file: &str) -> &'p mut Step {
    preset
        .add(Extract::new(file).when_conflict(ConflictPolicy::Ask))
        .with_title(title)
}

// One prompt for interactive runs, one flag-driven option otherwise
fn configure(preset: &mut Preset, option: &ConfigOption) {
    preset
        .group(|group| {
            if option.question {
                group.confirm(option.key, option.message, option.default.is_truthy());
            } else {
                group.input(
                    option.key,
                    option.message,
                    option.default.as_str().unwrap_or_default(),
                );
            }
        })
        .without_title()
        .if_interactive();

    preset
        .group(|group| {
            group.option(option.key, option.default.clone());
        })
        .without_title()
        .if_not_interactive();
}

fn validate<A: Adder + ?Sized>(adder: &A) -> Result<()> {
    let mut keys = HashSet::new();
    for option in adder.configuration() {
        if !keys.insert(option.key) {
            return Err(PresetError::DuplicateOption(option.key.to_string()));
        }
    }

    for dependency in adder.dependencies() {
        dependency.validate()?;
        if let Some(key) = dependency.relies_on {
            if !keys.contains(key) {
                return Err(PresetError::UnknownOption {
                    dependency: dependency.name.to_string(),
                    option: key.to_string(),
                });
            }
        }
    }

    Ok(())
}
