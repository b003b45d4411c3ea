use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use super::types::Area;
use crate::error::{ReviewError, Result};

/// Output of the codebase-analysis stage: the functional areas to review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default)]
    pub functional_areas: Vec<Area>,
}

impl AreaManifest {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ReviewError::read(path, e))?;
        let manifest: Self = serde_json::from_str(&content)?;
        debug!(
            path = %path.display(),
            areas = manifest.functional_areas.len(),
            "Loaded area manifest"
        );
        Ok(manifest)
    }

    /// Find an area by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&Area> {
        self.functional_areas
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Select areas: all of them, or the single area named `filter`.
    pub fn select(&self, filter: Option<&str>) -> Result<Vec<&Area>> {
        match filter {
            Some(name) => self
                .find(name)
                .map(|a| vec![a])
                .ok_or_else(|| ReviewError::AreaNotFound(name.to_string())),
            None => Ok(self.functional_areas.iter().collect()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.functional_areas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.functional_areas.len()
    }
}
