//! Adder Core - Shared library for declarative project adders
//!
//! An adder declares what it wants to change in a project (configuration
//! options, dependencies, template extractions, JSON merges, guidance) and the
//! preset engine in this crate executes those declarations in order against a
//! target directory.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Declarations** - `Adder` trait, `ConfigOption` and `Dependency` tables
//! - **Layer 2: Preset engine** - `Preset` steps with conditions, executed by `preset::apply`
//! - **Layer 3: CLI/TUI Interface** - clap flags generated from the adder and
//!   optional cliclack prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use adder_core::{apply, ApplyOptions, Configuration, Mode, Scripted};
//!
//! let preset = MyAdder.run()?;
//! let options = ApplyOptions::new("path/to/project", Configuration::new(Mode::NonInteractive));
//! let report = apply(&preset, &MyAdder.templates(), options, &mut Scripted::new())?;
//! ```

pub mod adder;
pub mod cli;
pub mod config;
pub mod dependency;
pub mod error;
pub mod interaction;
pub mod preset;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use adder::{safe_extract, Adder};
pub use cli::{AdderArgs, RunArgs};
pub use config::{ConfigOption, ConfigValue, Configuration, Mode};
pub use dependency::{Dependency, DependencyKind};
pub use error::PresetError;
pub use interaction::{Interaction, Scripted};
pub use preset::{
    apply, ApplyOptions, ConflictPolicy, EditJson, Extract, Instruct, Outcome, Preset, Report,
};
pub use templates::{EmbeddedTemplate, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
