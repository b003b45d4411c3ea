//! Review profile types.
//!
//! A profile is a markdown guideline document with frontmatter describing when
//! it applies (`name`, `keywords`, `matches`) and what it builds on (`extends`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Profile kind. Determines ranking among matches and seed order during
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Rank 4: a concrete framework (django, react, ...)
    Framework,
    /// Rank 1: a cross-cutting pattern (rest-api, event-sourcing, ...)
    Pattern,
    /// Rank 2: general guidance for a programming language
    Language,
    /// Rank 3: a system or platform (kafka, postgres, ...)
    System,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 4] = [
        ProfileKind::Framework,
        ProfileKind::Pattern,
        ProfileKind::Language,
        ProfileKind::System,
    ];

    /// Specificity rank: `framework > system > language > pattern`.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Framework => 4,
            Self::System => 3,
            Self::Language => 2,
            Self::Pattern => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Framework => "framework",
            Self::Pattern => "pattern",
            Self::Language => "language",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProfileKind(pub String);

impl fmt::Display for UnknownProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid type '{}' (expected framework, pattern, language or system)",
            self.0
        )
    }
}

impl std::error::Error for UnknownProfileKind {}

impl FromStr for ProfileKind {
    type Err = UnknownProfileKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| UnknownProfileKind(s.to_string()))
    }
}

/// Explicit match rules declared in a profile's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMatches {
    #[serde(default)]
    pub area_type: Vec<String>,
    #[serde(default)]
    pub name_contains: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl ProfileMatches {
    pub fn is_empty(&self) -> bool {
        self.area_type.is_empty() && self.name_contains.is_empty() && self.technologies.is_empty()
    }
}

/// A review profile. Fields are public and the builders do not validate;
/// `ProfileCatalog` skips profiles with an empty name or keyword set, so every
/// profile reachable through a catalog has both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ProfileKind,
    pub name: String,
    pub keywords: Vec<String>,
    pub extends: Vec<String>,
    pub priority: i64,
    pub matches: Option<ProfileMatches>,
    pub content: String,
}

impl Profile {
    pub fn new(path: impl Into<String>, kind: ProfileKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: path.into(),
            kind,
            keywords: vec![name.clone()],
            name,
            extends: Vec::new(),
            priority: 0,
            matches: None,
            content: String::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = dedup_preserving_order(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_extends<I, S>(mut self, extends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extends = extends.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_matches(mut self, matches: ProfileMatches) -> Self {
        self.matches = Some(matches);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

pub(crate) fn dedup_preserving_order(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_rank() {
        assert_eq!(ProfileKind::Framework.rank(), 4);
        assert_eq!(ProfileKind::System.rank(), 3);
        assert_eq!(ProfileKind::Language.rank(), 2);
        assert_eq!(ProfileKind::Pattern.rank(), 1);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("framework".parse::<ProfileKind>(), Ok(ProfileKind::Framework));
        assert_eq!(" system ".parse::<ProfileKind>(), Ok(ProfileKind::System));
        assert!("library".parse::<ProfileKind>().is_err());
        assert!("Framework".parse::<ProfileKind>().is_err());
    }

    #[test]
    fn test_builder_dedups_keywords() {
        let profile = Profile::new("django.md", ProfileKind::Framework, "django")
            .with_keywords(["django", "python", "django"]);
        assert_eq!(profile.keywords, vec!["django", "python"]);
    }

    #[test]
    fn test_matches_is_empty() {
        assert!(ProfileMatches::default().is_empty());
        let matches = ProfileMatches {
            area_type: vec!["backend".into()],
            ..Default::default()
        };
        assert!(!matches.is_empty());
    }
}
