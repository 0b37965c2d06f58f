//! Configuration option declarations

use crate::error::{PresetError, Result};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// A resolved (or default) configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Text(Cow<'static, str>),
}

impl ConfigValue {
    /// `true`, or any non-empty text
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Bool(b) => *b,
            ConfigValue::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s.as_ref()),
            ConfigValue::Bool(_) => None,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        ConfigValue::Text(Cow::Owned(s.into()))
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A single configuration option declared by an adder
///
/// Resolved either through an interactive prompt or a CLI flag, never both.
/// The default seeds the prompt's initial value and stands in for a missing flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOption {
    pub key: &'static str,
    pub message: &'static str,
    pub default: ConfigValue,
    /// Yes/no question (confirm prompt) rather than free-text input
    pub question: bool,
}

impl ConfigOption {
    pub const fn question(key: &'static str, message: &'static str, default: bool) -> Self {
        Self {
            key,
            message,
            default: ConfigValue::Bool(default),
            question: true,
        }
    }

    pub const fn input(key: &'static str, message: &'static str, default: &'static str) -> Self {
        Self {
            key,
            message,
            default: ConfigValue::Text(Cow::Borrowed(default)),
            question: false,
        }
    }

    /// Interpret a raw flag value the way this option expects it
    pub fn parse_value(&self, raw: &str) -> Result<ConfigValue> {
        if !self.question {
            return Ok(ConfigValue::text(raw));
        }

        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "on" => Ok(ConfigValue::Bool(true)),
            "false" | "no" | "n" | "0" | "off" => Ok(ConfigValue::Bool(false)),
            _ => Err(PresetError::InvalidOptionValue {
                key: self.key.to_string(),
                expected: "a boolean (true/false)",
            }),
        }
    }
}
