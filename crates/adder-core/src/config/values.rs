//! Resolved configuration values for a single preset run

use super::option::ConfigValue;
use std::collections::HashMap;

/// Where configuration values come from during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Values come from live prompts
    Interactive,
    /// Values come from CLI flags, falling back to option defaults
    #[default]
    NonInteractive,
}

/// Configuration state observed by step conditions
///
/// Prompt answers and flag-driven options are stored separately. Reads go
/// through [`Configuration::get`], which picks one store based on the mode.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    mode: Mode,
    /// Raw values supplied on the command line
    flags: HashMap<String, ConfigValue>,
    prompts: HashMap<String, ConfigValue>,
    options: HashMap<String, ConfigValue>,
}

impl Configuration {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Attach CLI-supplied values, consulted when option steps execute
    pub fn with_flags(mut self, flags: HashMap<String, ConfigValue>) -> Self {
        self.flags = flags;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == Mode::Interactive
    }

    /// The resolved value for `key`: the prompt answer in interactive mode,
    /// the flag-driven option otherwise
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self.mode {
            Mode::Interactive => self.prompts.get(key),
            Mode::NonInteractive => self.options.get(key),
        }
    }

    /// Whether `key` resolved to a truthy value. Unresolved keys are false.
    pub fn enabled(&self, key: &str) -> bool {
        self.get(key).is_some_and(ConfigValue::is_truthy)
    }

    pub(crate) fn flag(&self, key: &str) -> Option<&ConfigValue> {
        self.flags.get(key)
    }

    pub(crate) fn set_prompt(&mut self, key: &str, value: ConfigValue) {
        self.prompts.insert(key.to_string(), value);
    }

    pub(crate) fn set_option(&mut self, key: &str, value: ConfigValue) {
        self.options.insert(key.to_string(), value);
    }

    /// All values visible in the current mode, sorted by key
    pub fn resolved(&self) -> Vec<(&str, &ConfigValue)> {
        let store = match self.mode {
            Mode::Interactive => &self.prompts,
            Mode::NonInteractive => &self.options,
        };
        let mut values: Vec<_> = store.iter().map(|(k, v)| (k.as_str(), v)).collect();
        values.sort_by(|a, b| a.0.cmp(b.0));
        values
    }
}
