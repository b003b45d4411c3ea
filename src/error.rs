use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid profile {path}: {reason}")]
    InvalidProfile { path: String, reason: String },

    #[error("Invalid frontmatter in {path}: {message}")]
    Frontmatter { path: String, message: String },

    #[error("Area not found: {0}")]
    AreaNotFound(String),

    #[error("No area selected. Pass --areas <FILE> or --name with --tech.")]
    NoAreaSelected,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_bw::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ReviewError {
    pub fn invalid_profile(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReviewError>;
