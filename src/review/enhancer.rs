use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::area::Area;
use crate::config::{ResolverConfig, ReviewConfig};
use crate::profile::{
    Profile, ProfileCatalog, ProfileChain, ProfileKind, ProfileLoader, ProfileMatcher,
    ProfileResolver, TechnologySet,
};

/// Summary of one matched profile, as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProfileKind,
    pub path: String,
    pub priority: i64,
    pub keywords: Vec<String>,
}

impl From<&Profile> for MatchedProfile {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            kind: profile.kind,
            path: profile.path.clone(),
            priority: profile.priority,
            keywords: profile.keywords.clone(),
        }
    }
}

/// Which guidance applies to an area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchInfo {
    pub area: String,
    pub matched: Vec<MatchedProfile>,
    pub chain: Vec<String>,
    /// Approximate number of checklist items and `###` sections in the chain.
    pub guideline_count: usize,
}

/// Integrates the profile catalog with review prompts.
///
/// Holds the catalog behind an `Arc`; every call matches and resolves afresh.
#[derive(Debug, Clone)]
pub struct ReviewEnhancer {
    catalog: Arc<ProfileCatalog>,
    resolver_config: ResolverConfig,
}

impl ReviewEnhancer {
    pub fn new(catalog: Arc<ProfileCatalog>, resolver_config: ResolverConfig) -> Self {
        Self {
            catalog,
            resolver_config,
        }
    }

    pub fn from_catalog(catalog: ProfileCatalog) -> Self {
        Self::new(Arc::new(catalog), ResolverConfig::default())
    }

    /// Load the catalog described by `config`. A failed load degrades to an
    /// empty catalog so callers fall back to generic guidance.
    pub async fn initialize(config: &ReviewConfig) -> Self {
        let loader = ProfileLoader::from_config(config);
        let catalog = match loader.load().await {
            Ok(catalog) => {
                info!(
                    count = catalog.len(),
                    skipped = catalog.skipped().len(),
                    "Loaded review profiles"
                );
                catalog
            }
            Err(e) => {
                warn!(error = %e, "Failed to initialize review profiles");
                ProfileCatalog::empty()
            }
        };
        Self::new(Arc::new(catalog), config.resolver.clone())
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<ProfileCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.catalog.iter()
    }

    pub fn matcher(&self) -> ProfileMatcher<'_> {
        ProfileMatcher::new(&self.catalog)
    }

    pub fn resolver(&self) -> ProfileResolver<'_> {
        ProfileResolver::from_config(&self.catalog, &self.resolver_config)
    }

    /// Match and resolve the profiles for an area.
    pub fn resolve(&self, area: &Area) -> (Vec<&Profile>, ProfileChain<'_>) {
        let matched = self.matcher().find_matching_profiles(area);
        let chain = self.resolver().resolve(&matched);
        (matched, chain)
    }

    /// Append technology-specific guidance to `base_prompt`. Returns the base
    /// prompt unchanged when no profile matches.
    pub fn enhance_prompt(&self, area: &Area, base_prompt: &str) -> String {
        self.enhance(area, base_prompt).0
    }

    /// Like [`enhance_prompt`](Self::enhance_prompt), also returning the chain
    /// the section was built from.
    pub fn enhance(&self, area: &Area, base_prompt: &str) -> (String, ProfileChain<'_>) {
        if self.catalog.is_empty() {
            return (base_prompt.to_string(), ProfileChain::default());
        }

        let (matched, chain) = self.resolve(area);
        if matched.is_empty() {
            return (base_prompt.to_string(), chain);
        }

        let prompt = format!(
            "{}\n\n{}",
            base_prompt,
            Self::format_profile_section(&chain, area)
        );
        (prompt, chain)
    }

    /// Render the prompt section for a resolved chain.
    pub fn format_profile_section(chain: &ProfileChain<'_>, area: &Area) -> String {
        let mut section = String::from("## Technology-Specific Review Guidelines\n\n");

        section.push_str("### Applied Profiles\n");
        section.push_str(
            "The following review profiles have been selected based on the detected technologies:\n\n",
        );
        for profile in chain.profiles() {
            let _ = writeln!(
                section,
                "- **{}** ({}): {}",
                profile.name,
                profile.kind,
                profile.keywords.join(", ")
            );
        }

        section.push_str("\n### Review Guidelines\n\n");
        for profile in chain.profiles().iter().filter(|p| !p.content.is_empty()) {
            let _ = write!(
                section,
                "#### {} Guidelines\n\n{}\n\n",
                profile.name, profile.content
            );
        }

        section.push_str("### Area Context\n\n");
        let _ = writeln!(section, "- **Area Name**: {}", area.name);
        let area_type = if area.area_type.is_empty() {
            "Not specified"
        } else {
            area.area_type.as_str()
        };
        let _ = writeln!(section, "- **Area Type**: {}", area_type);
        let technologies = if area.technologies.is_empty() {
            "None detected".to_string()
        } else {
            area.technology_names().join(", ")
        };
        let _ = writeln!(section, "- **Technologies**: {}", technologies);
        let _ = writeln!(
            section,
            "- **Complexity**: {}/5",
            area.complexity_score.unwrap_or(0)
        );

        section
    }

    /// Human-readable explanation of matching and resolution for an area.
    pub fn debug_match(&self, area: &Area) -> String {
        let technologies = TechnologySet::from_area(area);
        let explained = self.matcher().explain(area);
        let matched: Vec<&Profile> = explained.iter().map(|(p, _)| *p).collect();
        let chain = self.resolver().resolve(&matched);

        let mut debug = String::new();
        let _ = writeln!(debug, "Debug information for area: {}", area.name);
        let declared = if area.technologies.is_empty() {
            "None".to_string()
        } else {
            area.technology_names().join(", ")
        };
        let _ = writeln!(debug, "Technologies: {}", declared);
        let _ = writeln!(
            debug,
            "Normalized: {}\n",
            technologies.iter().collect::<Vec<_>>().join(", ")
        );

        let _ = writeln!(debug, "Matched profiles ({}):", explained.len());
        for (profile, reason) in &explained {
            let _ = writeln!(
                debug,
                "  - {} ({}, priority: {}) via {}",
                profile.name, profile.kind, profile.priority, reason
            );
        }

        let _ = writeln!(debug, "\nResolved chain ({}):", chain.len());
        for profile in chain.profiles() {
            let _ = writeln!(debug, "  - {} ({})", profile.name, profile.kind);
        }

        if !chain.warnings().is_empty() {
            let _ = writeln!(debug, "\nWarnings ({}):", chain.warnings().len());
            for warning in chain.warnings() {
                let _ = writeln!(debug, "  - {}", warning);
            }
        }

        debug
    }

    /// Matched profiles, resolved chain and approximate guideline count.
    pub fn match_info(&self, area: &Area) -> MatchInfo {
        let (matched, chain) = self.resolve(area);

        MatchInfo {
            area: area.name.clone(),
            matched: matched.iter().map(|p| MatchedProfile::from(*p)).collect(),
            chain: chain.names().into_iter().map(String::from).collect(),
            guideline_count: chain
                .profiles()
                .iter()
                .map(|p| guideline_count(&p.content))
                .sum(),
        }
    }
}

/// Approximate guideline items in a profile body: checklist markers (`[ ]`,
/// `[x]`) plus lines starting with `###`.
pub fn guideline_count(content: &str) -> usize {
    let checklist = content.matches("[ ]").count() + content.matches("[x]").count();
    let sections = content.lines().filter(|l| l.starts_with("###")).count();
    checklist + sections
}
