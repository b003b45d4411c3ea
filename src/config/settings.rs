use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::{ReviewError, Result};
use crate::profile::{DEFAULT_BASE_FILE, DEFAULT_BASE_LANGUAGES};

pub const CONFIG_FILE_NAME: &str = "review-profiles.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub profiles: ProfilesConfig,
    pub resolver: ResolverConfig,
}

impl ReviewConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub async fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = fs::read_to_string(path)
                .await
                .map_err(|e| ReviewError::read(path, e))?;
            debug!(path = %path.display(), "Loaded configuration");
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ReviewError::Config(e.to_string()))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Override the profiles directory (e.g. from the command line).
    pub fn with_profiles_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.profiles.dir = dir.into();
        self
    }

    /// Validate configuration values, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.profiles.dir.as_os_str().is_empty() {
            errors.push("profiles.dir must not be empty".to_string());
        }
        if self.profiles.extension.trim().is_empty() {
            errors.push("profiles.extension must not be empty".to_string());
        }
        if self.profiles.extension.starts_with('.') {
            errors.push("profiles.extension must not start with '.'".to_string());
        }

        if self.resolver.base_file.trim().is_empty() {
            errors.push("resolver.base_file must not be empty".to_string());
        }
        if self.resolver.base_file.contains('/') {
            errors.push("resolver.base_file must be a file name, not a path".to_string());
        }
        if self
            .resolver
            .base_languages
            .iter()
            .any(|l| l.trim().is_empty())
        {
            errors.push("resolver.base_languages must not contain empty entries".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ReviewError::Config(errors.join("; ")))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilesConfig {
    /// Root directory of the profile catalog.
    pub dir: PathBuf,
    /// File extension of profile documents (without the dot).
    pub extension: String,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("prompts/review-profiles"),
            extension: "md".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Languages whose base profile is auto-included for matched frameworks.
    pub base_languages: Vec<String>,
    /// File name of a language base profile inside `<language>/`.
    pub base_file: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_languages: DEFAULT_BASE_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            base_file: DEFAULT_BASE_FILE.to_string(),
        }
    }
}
