//! Package dependencies declared by an adder

use crate::error::{PresetError, Result};
use std::fmt;

/// Which section of `package.json` a dependency lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Plain,
    Dev,
    Peer,
}

impl DependencyKind {
    /// The `package.json` key for this kind
    pub fn manifest_section(&self) -> &'static str {
        match self {
            DependencyKind::Plain => "dependencies",
            DependencyKind::Dev => "devDependencies",
            DependencyKind::Peer => "peerDependencies",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DependencyKind::Plain => "dependency",
            DependencyKind::Dev => "dev dependency",
            DependencyKind::Peer => "peer dependency",
        };
        write!(f, "{}", label)
    }
}

/// A package an adder requires, optionally gated on a configuration option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: &'static str,
    pub version: &'static str,
    pub kind: DependencyKind,
    /// Only added when this option resolves truthy
    pub relies_on: Option<&'static str>,
}

impl Dependency {
    pub const fn new(name: &'static str, version: &'static str) -> Self {
        Self {
            name,
            version,
            kind: DependencyKind::Plain,
            relies_on: None,
        }
    }

    pub const fn dev(name: &'static str, version: &'static str) -> Self {
        Self {
            kind: DependencyKind::Dev,
            ..Self::new(name, version)
        }
    }

    pub const fn peer(name: &'static str, version: &'static str) -> Self {
        Self {
            kind: DependencyKind::Peer,
            ..Self::new(name, version)
        }
    }

    pub const fn relies_on(mut self, key: &'static str) -> Self {
        self.relies_on = Some(key);
        self
    }

    /// Reject blank version ranges
    ///
    /// Anything else is an npm range or tag and goes into the manifest as-is.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(PresetError::InvalidVersionRange {
                dependency: self.name.to_string(),
                range: self.version.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(Dependency::new("svelte", "^3.0.0").kind, DependencyKind::Plain);
        assert_eq!(Dependency::dev("jest", "^26.6.0").kind, DependencyKind::Dev);
        assert_eq!(Dependency::peer("svelte", "^3.0.0").kind, DependencyKind::Peer);
    }

    #[test]
    fn test_relies_on() {
        let dep = Dependency::dev("ts-jest", "^26.5.0").relies_on("ts");
        assert_eq!(dep.relies_on, Some("ts"));
        assert_eq!(dep.kind, DependencyKind::Dev);
    }

    #[test]
    fn test_manifest_sections() {
        assert_eq!(DependencyKind::Plain.manifest_section(), "dependencies");
        assert_eq!(DependencyKind::Dev.manifest_section(), "devDependencies");
        assert_eq!(DependencyKind::Peer.manifest_section(), "peerDependencies");
    }

    #[test]
    fn test_npm_ranges_are_accepted() {
        for range in [
            "^26.0.22",
            ">=3.0.0 <4.0.0",
            "^3.0.0 || ^4.0.0",
            "1.2.3 - 2.3.4",
            "next",
            "latest",
            "*",
        ] {
            assert!(
                Dependency::peer("svelte", range).validate().is_ok(),
                "{} should be accepted",
                range
            );
        }
    }

    #[test]
    fn test_blank_range_rejected() {
        for range in ["", "   "] {
            assert!(matches!(
                Dependency::dev("jest", range).validate(),
                Err(PresetError::InvalidVersionRange { .. })
            ));
        }
    }
}
