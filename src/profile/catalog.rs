//! Immutable profile catalog keyed by path.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use super::types::{Profile, ProfileKind};

/// A document excluded from the catalog, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProfile {
    pub path: String,
    pub reason: String,
}

impl SkippedProfile {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// The loaded set of profiles.
///
/// Built once and read-only afterwards. Iteration follows `path` order so that
/// matching and resolution are deterministic for a fixed catalog.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    profiles: BTreeMap<String, Profile>,
    skipped: Vec<SkippedProfile>,
}

impl ProfileCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from already-constructed profiles.
    ///
    /// Profiles with an empty name or keyword set, or a path already taken by an
    /// earlier profile, are recorded as skipped.
    pub fn from_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        Self::with_skipped(profiles, Vec::new())
    }

    pub(crate) fn with_skipped(
        profiles: impl IntoIterator<Item = Profile>,
        mut skipped: Vec<SkippedProfile>,
    ) -> Self {
        let mut by_path = BTreeMap::new();

        for profile in profiles {
            let reason = if profile.name.trim().is_empty() {
                Some("missing required field: name".to_string())
            } else if profile.keywords.is_empty() {
                Some("missing required field: keywords".to_string())
            } else if by_path.contains_key(&profile.path) {
                Some("duplicate profile path".to_string())
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    warn!(path = %profile.path, %reason, "Skipping profile");
                    skipped.push(SkippedProfile::new(profile.path, reason));
                }
                None => {
                    by_path.insert(profile.path.clone(), profile);
                }
            }
        }

        Self {
            profiles: by_path,
            skipped,
        }
    }

    pub fn get(&self, path: &str) -> Option<&Profile> {
        self.profiles.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.profiles.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    pub fn by_kind(&self, kind: ProfileKind) -> impl Iterator<Item = &Profile> {
        self.iter().filter(move |p| p.kind == kind)
    }

    pub fn skipped(&self) -> &[SkippedProfile] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}
