//! Charm-style CLI prompts using cliclack

use crate::adder::Adder;
use crate::cli::RunArgs;
use crate::config::{Configuration, Mode};
use crate::interaction::Interaction;
use crate::preset::{self, ApplyOptions, Outcome, Report};
use crate::templates::{self, TemplateSource};
use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};

/// [`Interaction`] backed by cliclack prompts and log lines
#[derive(Debug, Default)]
pub struct ClackInteraction;

impl Interaction for ClackInteraction {
    fn confirm(&mut self, message: &str, initial: bool) -> io::Result<bool> {
        cliclack::confirm(message).initial_value(initial).interact()
    }

    fn input(&mut self, message: &str, default: &str) -> io::Result<String> {
        cliclack::input(message)
            .placeholder(default)
            .default_input(default)
            .interact()
    }

    fn step(&mut self, title: &str) -> io::Result<()> {
        cliclack::log::step(title)
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::warning(message)
    }

    fn instruct(&mut self, heading: &str, text: &str) -> io::Result<()> {
        cliclack::note(heading, text)
    }
}

/// Run an adder against a project with interactive output
pub fn run<A: Adder + ?Sized>(adder: &A, args: RunArgs) -> Result<()> {
    cliclack::intro(adder.name())?;

    // Step 1: Declare the preset (validates the adder's tables)
    let preset = adder
        .run()
        .with_context(|| format!("Invalid adder definition for {}", adder.name()))?;

    // Step 2: Resolve templates and make sure every extracted file is available
    let templates = select_templates(adder, &args.template_dir)?;
    templates::check_templates(&templates, &preset.required_templates())?;

    // Step 3: Locate the target project
    let project_dir = select_directory(&args)?;

    // Step 4: Apply
    let mode = if args.interactive {
        Mode::Interactive
    } else {
        Mode::NonInteractive
    };
    let configuration = Configuration::new(mode).with_flags(args.flags);
    let options = ApplyOptions::new(&project_dir, configuration).assume_yes(args.yes);

    let report = preset::apply(&preset, &templates, options, &mut ClackInteraction)
        .with_context(|| format!("Failed to apply {}", adder.name()))?;

    // Step 5: Summarize
    print_summary(&report)?;

    cliclack::outro(format!("{} applied to {}", adder.name(), project_dir.display()))?;

    Ok(())
}

fn select_templates<A: Adder + ?Sized>(
    adder: &A,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateSource> {
    let source = match template_dir {
        Some(path) => TemplateSource::Local(path.clone()),
        None => adder.templates(),
    };

    if let TemplateSource::Local(path) = &source {
        if !path.is_dir() {
            anyhow::bail!("Template directory not found: {}", path.display());
        }
        cliclack::log::info(format!("Using local templates from {}", path.display()))?;
    }

    Ok(source)
}

fn select_directory(args: &RunArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }

    if !path.join("package.json").is_file() {
        anyhow::bail!(
            "No package.json found in {}. Run this inside an existing project.",
            path.display()
        );
    }

    cliclack::log::info(format!("Using project: {}", display_path(&path)))?;

    Ok(path)
}

fn display_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn print_summary(report: &Report) -> Result<()> {
    let settings: serde_json::Map<String, serde_json::Value> = report
        .configuration
        .resolved()
        .into_iter()
        .filter_map(|(key, value)| {
            serde_json::to_value(value)
                .ok()
                .map(|value| (key.to_string(), value))
        })
        .collect();
    if !settings.is_empty() {
        cliclack::log::info(format!(
            "Configuration: {}",
            serde_json::Value::Object(settings)
        ))?;
    }

    let mut files = 0;
    let mut kept = 0;
    for outcome in &report.outcomes {
        match outcome {
            Outcome::Extracted(_) | Outcome::Merged(_) => files += 1,
            Outcome::Kept(_) => kept += 1,
            _ => {}
        }
    }

    let dependencies = report.dependencies();
    cliclack::log::success(format!(
        "Updated {} file(s), added {} dependenc{}",
        files,
        dependencies.len(),
        if dependencies.len() == 1 { "y" } else { "ies" }
    ))?;

    if kept > 0 {
        cliclack::log::warning(format!("Kept {} existing file(s) unchanged", kept))?;
    }

    Ok(())
}
