use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a detected technology, as reported by the analysis stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnologyKind {
    Language,
    Framework,
    #[default]
    Library,
    Tool,
    Database,
    Service,
    #[serde(other)]
    Other,
}

impl fmt::Display for TechnologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Language => "language",
            Self::Framework => "framework",
            Self::Library => "library",
            Self::Tool => "tool",
            Self::Database => "database",
            Self::Service => "service",
            Self::Other => "other",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: TechnologyKind,
}

impl Technology {
    pub fn new(name: impl Into<String>, kind: TechnologyKind) -> Self {
        Self {
            name: name.into(),
            version: None,
            kind,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// A functional area of a codebase: the unit profiles are matched against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
    #[serde(default)]
    pub area_type: String,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<u8>,
}

impl Area {
    pub fn new(name: impl Into<String>, area_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            area_type: area_type.into(),
            technologies: Vec::new(),
            description: None,
            complexity_score: None,
        }
    }

    pub fn with_technology(mut self, technology: Technology) -> Self {
        self.technologies.push(technology);
        self
    }

    pub fn with_technologies(mut self, technologies: impl IntoIterator<Item = Technology>) -> Self {
        self.technologies.extend(technologies);
        self
    }

    pub fn with_complexity(mut self, score: u8) -> Self {
        self.complexity_score = Some(score);
        self
    }

    pub fn technology_names(&self) -> Vec<&str> {
        self.technologies.iter().map(|t| t.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_area() {
        let json = r#"{
            "name": "API",
            "area_type": "backend",
            "technologies": [
                {"name": "Django", "type": "framework"},
                {"name": "Python", "version": "3.12", "type": "language"}
            ],
            "complexity_score": 3
        }"#;

        let area: Area = serde_json::from_str(json).unwrap();
        assert_eq!(area.name, "API");
        assert_eq!(area.technologies.len(), 2);
        assert_eq!(area.technologies[0].kind, TechnologyKind::Framework);
        assert_eq!(area.technologies[1].version.as_deref(), Some("3.12"));
        assert_eq!(area.complexity_score, Some(3));
    }

    #[test]
    fn test_unknown_technology_kind() {
        let tech: Technology =
            serde_json::from_str(r#"{"name": "Terraform", "type": "infrastructure"}"#).unwrap();
        assert_eq!(tech.kind, TechnologyKind::Other);
    }

    #[test]
    fn test_missing_optional_fields() {
        let area: Area = serde_json::from_str(r#"{"name": "Shared"}"#).unwrap();
        assert!(area.area_type.is_empty());
        assert!(area.technologies.is_empty());
        assert!(area.complexity_score.is_none());
    }
}
