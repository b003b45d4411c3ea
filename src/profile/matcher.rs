//! Profile matcher for selecting the profiles that apply to an area.

use std::cmp::Reverse;
use std::fmt;

use serde::Serialize;

use super::catalog::ProfileCatalog;
use super::technology::TechnologySet;
use super::types::Profile;
use crate::area::Area;

/// The first rule that selected a profile for an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "token", rename_all = "snake_case")]
pub enum MatchReason {
    /// Profile name equals a declared technology.
    Name,
    /// A profile keyword equals a declared technology.
    Keyword(String),
    /// Explicit `matches.area_type` rule.
    AreaType(String),
    /// Explicit `matches.name_contains` rule.
    NameContains(String),
    /// Explicit `matches.technologies` rule.
    Technology(String),
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Keyword(k) => write!(f, "keyword '{}'", k),
            Self::AreaType(t) => write!(f, "area type '{}'", t),
            Self::NameContains(s) => write!(f, "area name contains '{}'", s),
            Self::Technology(t) => write!(f, "technology '{}'", t),
        }
    }
}

/// Selects catalog profiles for an area.
pub struct ProfileMatcher<'a> {
    catalog: &'a ProfileCatalog,
}

impl<'a> ProfileMatcher<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self { catalog }
    }

    /// Find all profiles matching an area, ranked by priority (highest first)
    /// then kind specificity. Ranking never affects which profiles match.
    pub fn find_matching_profiles(&self, area: &Area) -> Vec<&'a Profile> {
        let technologies = TechnologySet::from_area(area);

        let mut matches: Vec<&'a Profile> = self
            .catalog
            .iter()
            .filter(|p| Self::match_reason(p, area, &technologies).is_some())
            .collect();

        matches.sort_by_key(|p| (Reverse(p.priority), Reverse(p.kind.rank())));
        matches
    }

    /// Like [`find_matching_profiles`](Self::find_matching_profiles), paired
    /// with the rule that selected each profile.
    pub fn explain(&self, area: &Area) -> Vec<(&'a Profile, MatchReason)> {
        let technologies = TechnologySet::from_area(area);
        self.find_matching_profiles(area)
            .into_iter()
            .filter_map(|p| Self::match_reason(p, area, &technologies).map(|r| (p, r)))
            .collect()
    }

    /// Return the first rule under which `profile` matches, if any.
    pub fn match_reason(
        profile: &Profile,
        area: &Area,
        technologies: &TechnologySet,
    ) -> Option<MatchReason> {
        // 1. Profile name against technologies
        if technologies.contains(&profile.name) {
            return Some(MatchReason::Name);
        }

        // 2. Keywords against technologies
        if let Some(keyword) = profile.keywords.iter().find(|k| technologies.contains(k)) {
            return Some(MatchReason::Keyword(keyword.clone()));
        }

        // 3. Explicit rules
        let rules = profile.matches.as_ref()?;

        if !area.area_type.is_empty() {
            let area_type = area.area_type.to_lowercase();
            if let Some(t) = rules
                .area_type
                .iter()
                .find(|t| t.to_lowercase() == area_type)
            {
                return Some(MatchReason::AreaType(t.clone()));
            }
        }

        let area_name = area.name.to_lowercase();
        if let Some(term) = rules
            .name_contains
            .iter()
            .find(|term| area_name.contains(&term.to_lowercase()))
        {
            return Some(MatchReason::NameContains(term.clone()));
        }

        rules
            .technologies
            .iter()
            .find(|t| technologies.contains(t))
            .map(|t| MatchReason::Technology(t.clone()))
    }
}
