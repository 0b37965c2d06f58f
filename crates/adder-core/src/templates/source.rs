//! Template sources - compiled-in files or a local directory

use crate::error::{PresetError, Result};
use std::path::PathBuf;
use walkdir::WalkDir;

/// A template file compiled into the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedTemplate {
    pub name: &'static str,
    pub contents: &'static str,
}

impl EmbeddedTemplate {
    pub const fn new(name: &'static str, contents: &'static str) -> Self {
        Self { name, contents }
    }
}

/// Template source - either embedded files or a local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Embedded(&'static [EmbeddedTemplate]),
    Local(PathBuf),
}

impl TemplateSource {
    /// Use the directory named by `env_var` when set, otherwise the embedded templates
    pub fn from_env(env_var: &str, embedded: &'static [EmbeddedTemplate]) -> Self {
        match std::env::var_os(env_var) {
            Some(dir) if !dir.is_empty() => Self::Local(PathBuf::from(dir)),
            _ => Self::Embedded(embedded),
        }
    }

    /// Read a template's contents by name (a path relative to the template root)
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        match self {
            TemplateSource::Embedded(templates) => templates
                .iter()
                .find(|t| t.name == name)
                .map(|t| t.contents.as_bytes().to_vec())
                .ok_or_else(|| PresetError::TemplateNotFound(name.to_string())),
            TemplateSource::Local(dir) => {
                let path = dir.join(name);
                if !path.is_file() {
                    return Err(PresetError::TemplateNotFound(name.to_string()));
                }
                std::fs::read(&path).map_err(|e| PresetError::io(path, e))
            }
        }
    }

    /// List every template this source can serve, sorted
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names = match self {
            TemplateSource::Embedded(templates) => {
                templates.iter().map(|t| t.name.to_string()).collect()
            }
            TemplateSource::Local(dir) => {
                let mut names = Vec::new();
                for entry in WalkDir::new(dir) {
                    let entry = entry.map_err(|e| {
                        let path = e.path().map(PathBuf::from).unwrap_or_else(|| dir.clone());
                        PresetError::io(path, e.into())
                    })?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if let Ok(relative) = entry.path().strip_prefix(dir) {
                        let name = relative
                            .components()
                            .map(|c| c.as_os_str().to_string_lossy())
                            .collect::<Vec<_>>()
                            .join("/");
                        names.push(name);
                    }
                }
                names
            }
        };
        names.sort();
        Ok(names)
    }
}
