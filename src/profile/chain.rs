//! Resolved profile chains and guideline merging.

use std::fmt;

use serde::Serialize;

use super::types::{Profile, ProfileKind};

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// A non-fatal problem found while resolving a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionWarning {
    /// A profile extends a path that is not in the catalog.
    MissingParent { profile: String, target: String },
    /// A matched framework implies a language with no base profile.
    MissingLanguageBase { language: String, path: String },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParent { profile, target } => {
                write!(f, "Profile {} extends non-existent profile: {}", profile, target)
            }
            Self::MissingLanguageBase { language, path } => {
                write!(f, "No base profile for language {} (expected {})", language, path)
            }
        }
    }
}

/// Ordered, duplicate-free sequence of profiles in application order.
///
/// Borrows profiles from the catalog it was resolved against; a new chain is
/// built for every resolution.
#[derive(Debug, Clone, Default)]
pub struct ProfileChain<'a> {
    profiles: Vec<&'a Profile>,
    warnings: Vec<ResolutionWarning>,
}

impl<'a> ProfileChain<'a> {
    pub(crate) fn new(profiles: Vec<&'a Profile>, warnings: Vec<ResolutionWarning>) -> Self {
        Self { profiles, warnings }
    }

    pub fn profiles(&self) -> &[&'a Profile] {
        &self.profiles
    }

    pub fn warnings(&self) -> &[ResolutionWarning] {
        &self.warnings
    }

    /// Profile names in chain order.
    pub fn names(&self) -> Vec<&'a str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn paths(&self) -> Vec<&'a str> {
        self.profiles.iter().map(|p| p.path.as_str()).collect()
    }

    /// Merge every profile's content into one guideline text, one section per
    /// profile in chain order.
    pub fn merged_guidelines(&self) -> String {
        self.profiles
            .iter()
            .map(|p| format!("{}\n\n{}", section_header(&p.name, p.kind), p.content))
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.path == path)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}

fn section_header(name: &str, kind: ProfileKind) -> String {
    format!("## Guidelines from {} ({})", name, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_guidelines_sections_in_order() {
        let python = Profile::new("python/_base.md", ProfileKind::Language, "python")
            .with_content("Use type hints.");
        let django = Profile::new("django.md", ProfileKind::Framework, "django")
            .with_content("Avoid N+1 queries.");

        let chain = ProfileChain::new(vec![&python, &django], Vec::new());
        assert_eq!(
            chain.merged_guidelines(),
            "## Guidelines from python (language)\n\nUse type hints.\n\n---\n\n\
             ## Guidelines from django (framework)\n\nAvoid N+1 queries."
        );
        assert_eq!(chain.names(), vec!["python", "django"]);
        assert_eq!(chain.position("django.md"), Some(1));
    }

    #[test]
    fn test_empty_chain() {
        let chain = ProfileChain::default();
        assert!(chain.is_empty());
        assert_eq!(chain.merged_guidelines(), "");
        assert!(chain.names().is_empty());
    }

    #[test]
    fn test_warning_display() {
        let warning = ResolutionWarning::MissingParent {
            profile: "django.md".into(),
            target: "patterns/mvc.md".into(),
        };
        assert_eq!(
            warning.to_string(),
            "Profile django.md extends non-existent profile: patterns/mvc.md"
        );
    }
}
