//! Template files extracted into target projects
//!
//! Templates are either compiled into the adder binary or read from a local
//! directory (useful while developing templates).

pub mod source;

pub use source::{EmbeddedTemplate, TemplateSource};

use crate::error::{PresetError, Result};

/// Ensure every template in `required` can be served by `source`
pub fn check_templates(source: &TemplateSource, required: &[&str]) -> Result<()> {
    let available = source.names()?;
    match required
        .iter()
        .find(|name| !available.iter().any(|a| a == *name))
    {
        Some(missing) => Err(PresetError::TemplateNotFound(missing.to_string())),
        None => Ok(()),
    }
}
