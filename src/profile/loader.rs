//! Profile loader for reading review profiles from the filesystem.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tokio::fs;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::catalog::{ProfileCatalog, SkippedProfile};
use super::types::{Profile, ProfileKind, ProfileMatches, dedup_preserving_order};
use crate::config::ReviewConfig;
use crate::error::{ReviewError, Result};

/// Loads every profile document under a root directory.
///
/// Expected directory structure:
/// ```text
/// prompts/review-profiles/
/// ├── django.md               # framework (inferred)
/// ├── react.md
/// ├── python/
/// │   └── _base.md            # language base for python (inferred)
/// ├── patterns/
/// │   └── rest-api.md         # pattern (inferred)
/// └── systems/
///     └── kafka.md            # system (inferred)
/// ```
pub struct ProfileLoader {
    profiles_dir: PathBuf,
    extension: String,
    base_file: String,
}

#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
    #[serde(default)]
    extends: Option<Vec<String>>,
    #[serde(default)]
    priority: Option<i64>,
    #[serde(default)]
    matches: Option<ProfileMatches>,
}

impl ProfileLoader {
    pub fn new(profiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
            extension: "md".into(),
            base_file: "_base.md".into(),
        }
    }

    pub fn from_config(config: &ReviewConfig) -> Self {
        Self::new(&config.profiles.dir)
            .with_extension(&config.profiles.extension)
            .with_base_file(&config.resolver.base_file)
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_base_file(mut self, base_file: impl Into<String>) -> Self {
        self.base_file = base_file.into();
        self
    }

    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }

    /// Load all profiles. Documents that fail to read, parse or validate are
    /// skipped with a warning; the load itself still succeeds.
    pub async fn load(&self) -> Result<ProfileCatalog> {
        if !self.profiles_dir.exists() {
            debug!(path = %self.profiles_dir.display(), "Profiles directory not found, skipping");
            return Ok(ProfileCatalog::empty());
        }

        let mut profiles = Vec::new();
        let mut skipped = Vec::new();

        for file in self.discover() {
            let relative = self.relative_path(&file);
            match self.load_profile_file(&file, &relative).await {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    warn!(path = %relative, error = %e, "Failed to load profile");
                    skipped.push(SkippedProfile::new(relative, e.to_string()));
                }
            }
        }

        let catalog = ProfileCatalog::with_skipped(profiles, skipped);
        debug!(
            count = catalog.len(),
            skipped = catalog.skipped().len(),
            "Loaded review profiles"
        );
        Ok(catalog)
    }

    fn discover(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.profiles_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == self.extension.as_str()))
            .collect()
    }

    /// Catalog key for a file: its path relative to the root, `/`-separated.
    fn relative_path(&self, file: &Path) -> String {
        let relative = file.strip_prefix(&self.profiles_dir).unwrap_or(file);
        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    async fn load_profile_file(&self, file: &Path, relative: &str) -> Result<Profile> {
        let content = fs::read_to_string(file)
            .await
            .map_err(|e| ReviewError::read(file, e))?;
        self.parse_profile(relative, &content)
    }

    /// Parse and validate a single profile document.
    pub fn parse_profile(&self, relative: &str, content: &str) -> Result<Profile> {
        let (frontmatter, body) = match split_frontmatter(content) {
            Some((raw, body)) => (parse_frontmatter(relative, raw)?, body),
            None => (Frontmatter::default(), content),
        };

        let kind = match frontmatter.kind.as_deref() {
            Some(raw) => raw
                .parse::<ProfileKind>()
                .map_err(|e| ReviewError::invalid_profile(relative, e.to_string()))?,
            None => self.infer_kind(relative),
        };

        let name = frontmatter
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.infer_name(relative));
        if name.is_empty() {
            return Err(ReviewError::invalid_profile(
                relative,
                "missing required field: name",
            ));
        }

        let keywords = dedup_preserving_order(
            frontmatter
                .keywords
                .unwrap_or_default()
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
        );
        if keywords.is_empty() {
            return Err(ReviewError::invalid_profile(
                relative,
                "missing required field: keywords",
            ));
        }

        Ok(Profile {
            path: relative.to_string(),
            kind,
            name,
            keywords,
            extends: frontmatter.extends.unwrap_or_default(),
            priority: frontmatter.priority.unwrap_or(0),
            matches: frontmatter.matches.filter(|m| !m.is_empty()),
            content: body.trim().to_string(),
        })
    }

    fn is_base_file(&self, relative: &str) -> bool {
        relative
            .rsplit_once('/')
            .is_some_and(|(_, file)| file == self.base_file)
    }

    /// Infer the profile kind from its location when frontmatter omits `type`.
    fn infer_kind(&self, relative: &str) -> ProfileKind {
        if relative.starts_with("patterns/") {
            ProfileKind::Pattern
        } else if relative.starts_with("systems/") {
            ProfileKind::System
        } else if self.is_base_file(relative) {
            ProfileKind::Language
        } else {
            ProfileKind::Framework
        }
    }

    /// File stem, or the parent directory name for a language base file.
    fn infer_name(&self, relative: &str) -> String {
        let (parent, file) = relative.rsplit_once('/').unwrap_or(("", relative));
        if file == self.base_file
            && let Some(dir) = parent.rsplit('/').next().filter(|d| !d.is_empty())
        {
            return dir.to_string();
        }

        Path::new(file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Split a document into its frontmatter block and body.
///
/// The block opens with a `---` line at the very start of the document and
/// closes at the next `---` line. Returns `None` when no block is present.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_frontmatter(relative: &str, raw: &str) -> Result<Frontmatter> {
    if raw.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml_bw::from_str(raw).map_err(|e| ReviewError::Frontmatter {
        path: relative.to_string(),
        message: e.to_string(),
    })
}
