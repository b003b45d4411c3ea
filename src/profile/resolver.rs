//! Profile resolver for expanding inheritance into an ordered chain.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::catalog::ProfileCatalog;
use super::chain::{ProfileChain, ResolutionWarning};
use super::types::{Profile, ProfileKind};
use crate::config::ResolverConfig;

/// Languages whose base profile is pulled in by a matched framework keyword.
pub const DEFAULT_BASE_LANGUAGES: [&str; 8] = [
    "python",
    "javascript",
    "typescript",
    "go",
    "java",
    "ruby",
    "rust",
    "csharp",
];

pub const DEFAULT_BASE_FILE: &str = "_base.md";

/// Resolves matched profiles into a chain, following `extends` against the
/// full catalog.
pub struct ProfileResolver<'a> {
    catalog: &'a ProfileCatalog,
    base_languages: Vec<String>,
    base_file: String,
}

impl<'a> ProfileResolver<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self {
            catalog,
            base_languages: DEFAULT_BASE_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            base_file: DEFAULT_BASE_FILE.to_string(),
        }
    }

    pub fn from_config(catalog: &'a ProfileCatalog, config: &ResolverConfig) -> Self {
        Self::new(catalog)
            .with_base_languages(config.base_languages.iter().cloned())
            .with_base_file(config.base_file.clone())
    }

    pub fn with_base_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_languages = languages
            .into_iter()
            .map(|l| l.into().to_lowercase())
            .collect();
        self
    }

    pub fn with_base_file(mut self, base_file: impl Into<String>) -> Self {
        self.base_file = base_file.into();
        self
    }

    /// Resolve matched profiles into a chain.
    ///
    /// Postconditions: every path appears once; when a profile and one of its
    /// `extends` parents are both in the chain, the parent comes first (for
    /// acyclic graphs); an implied language base comes before every matched
    /// framework that implies it.
    pub fn resolve(&self, matched: &[&'a Profile]) -> ProfileChain<'a> {
        let mut warnings = Vec::new();
        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut resolved: Vec<&'a Profile> = Vec::new();
        let mut implied: HashMap<&'a str, Vec<&'a str>> = HashMap::new();

        // Coarse-grained kinds first: pattern < language < system < framework
        let mut seeds = matched.to_vec();
        seeds.sort_by_key(|p| p.kind.rank());

        for profile in seeds {
            self.expand(profile, &mut seen, &mut resolved, &mut warnings);
        }

        let mut bases = self.language_bases(matched, &mut seen, &mut implied, &mut warnings);
        if !bases.is_empty() {
            bases.append(&mut resolved);
            resolved = bases;
        }

        // Bases placed earlier through `extends` are not in the prefix block;
        // the implied edges still order them ahead of their frameworks.
        let chain = parents_first(dedup_by_path(resolved), &implied);
        debug!(
            matched = matched.len(),
            resolved = chain.len(),
            warnings = warnings.len(),
            "Resolved profile chain"
        );
        ProfileChain::new(chain, warnings)
    }

    /// Append `root` and its transitive parents (parents first) to `out`.
    fn expand(
        &self,
        root: &'a Profile,
        seen: &mut HashSet<&'a str>,
        out: &mut Vec<&'a Profile>,
        warnings: &mut Vec<ResolutionWarning>,
    ) {
        depth_first(root, seen, out, extends_of, |profile, target| {
            let parent = self.catalog.get(target);
            if parent.is_none() {
                warn!(
                    profile = %profile.path,
                    parent = target,
                    "Profile extends non-existent profile"
                );
                warnings.push(ResolutionWarning::MissingParent {
                    profile: profile.path.clone(),
                    target: target.to_string(),
                });
            }
            parent
        });
    }

    /// Base profiles for languages named in matched framework keywords, in
    /// discovery order, each preceded by its own unseen parents. Records a
    /// framework -> base edge in `implied` for every base found in the catalog.
    fn language_bases(
        &self,
        matched: &[&'a Profile],
        seen: &mut HashSet<&'a str>,
        implied: &mut HashMap<&'a str, Vec<&'a str>>,
        warnings: &mut Vec<ResolutionWarning>,
    ) -> Vec<&'a Profile> {
        let mut languages: Vec<String> = Vec::new();
        for profile in matched.iter().filter(|p| p.kind == ProfileKind::Framework) {
            for keyword in &profile.keywords {
                let language = keyword.to_lowercase();
                if !self.base_languages.contains(&language) {
                    continue;
                }
                if let Some(base) = self.catalog.get(&self.base_path(&language)) {
                    implied
                        .entry(profile.path.as_str())
                        .or_default()
                        .push(base.path.as_str());
                }
                if !languages.contains(&language) {
                    languages.push(language);
                }
            }
        }

        let mut bases = Vec::new();
        for language in languages {
            let path = self.base_path(&language);
            match self.catalog.get(&path) {
                Some(base) => self.expand(base, seen, &mut bases, warnings),
                None => {
                    warn!(%language, %path, "Language base profile not found");
                    warnings.push(ResolutionWarning::MissingLanguageBase { language, path });
                }
            }
        }
        bases
    }

    /// Catalog path of a language's base profile (`python/_base.md`).
    pub fn base_path(&self, language: &str) -> String {
        format!("{}/{}", language, self.base_file)
    }
}

fn extends_of(profile: &Profile) -> Vec<&str> {
    profile.extends.iter().map(String::as_str).collect()
}

/// Explicit-stack depth-first walk over the parent paths returned by `edges`,
/// emitting each profile after its parents. `seen` is shared across walks; a
/// profile already seen (placed, or on the current path in a cycle) is not
/// revisited.
fn depth_first<'p, E, F>(
    root: &'p Profile,
    seen: &mut HashSet<&'p str>,
    out: &mut Vec<&'p Profile>,
    edges: E,
    mut parent_of: F,
) where
    E: Fn(&'p Profile) -> Vec<&'p str>,
    F: FnMut(&'p Profile, &'p str) -> Option<&'p Profile>,
{
    if !seen.insert(root.path.as_str()) {
        return;
    }

    let mut stack: Vec<(&'p Profile, Vec<&'p str>, usize)> = vec![(root, edges(root), 0)];
    while let Some((profile, targets, next)) = stack.last_mut() {
        let profile = *profile;
        let target = targets.get(*next).copied();
        *next += 1;

        match target {
            Some(target) => {
                if let Some(parent) = parent_of(profile, target)
                    && seen.insert(parent.path.as_str())
                {
                    stack.push((parent, edges(parent), 0));
                }
            }
            None => {
                out.push(profile);
                stack.pop();
            }
        }
    }
}

fn dedup_by_path<'p>(profiles: Vec<&'p Profile>) -> Vec<&'p Profile> {
    let mut seen = HashSet::new();
    profiles
        .into_iter()
        .filter(|&p| seen.insert(p.path.as_str()))
        .collect()
}

/// Stable reorder so that parents present in the chain precede their
/// children. Parents are `extends` targets plus the `implied` language bases.
/// Leaves an already parent-first chain untouched.
fn parents_first<'p>(
    chain: Vec<&'p Profile>,
    implied: &HashMap<&'p str, Vec<&'p str>>,
) -> Vec<&'p Profile> {
    let present: HashMap<&'p str, &'p Profile> =
        chain.iter().map(|&p| (p.path.as_str(), p)).collect();
    let edges = |profile: &'p Profile| -> Vec<&'p str> {
        implied
            .get(profile.path.as_str())
            .into_iter()
            .flatten()
            .copied()
            .chain(profile.extends.iter().map(String::as_str))
            .collect()
    };

    let mut seen = HashSet::new();
    let mut ordered = Vec::with_capacity(chain.len());
    for profile in chain.iter().copied() {
        depth_first(profile, &mut seen, &mut ordered, edges, |_, target| {
            present.get(target).copied()
        });
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framework(path: &str, name: &str) -> Profile {
        Profile::new(path, ProfileKind::Framework, name)
    }

    fn names<'a>(chain: &ProfileChain<'a>) -> Vec<&'a str> {
        chain.names()
    }

    #[test]
    fn test_django_pulls_in_python_base() {
        let catalog = ProfileCatalog::from_profiles([
            Profile::new("python/_base.md", ProfileKind::Language, "python"),
            framework("django.md", "django").with_keywords(["django", "python"]),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let django = catalog.get("django.md").unwrap();
        let chain = resolver.resolve(&[django]);
        assert_eq!(names(&chain), vec!["python", "django"]);
        assert!(chain.warnings().is_empty());
    }

    #[test]
    fn test_parents_precede_children() {
        let catalog = ProfileCatalog::from_profiles([
            Profile::new("patterns/web.md", ProfileKind::Pattern, "web"),
            Profile::new("patterns/mvc.md", ProfileKind::Pattern, "mvc")
                .with_extends(["patterns/web.md"]),
            framework("rails.md", "rails").with_extends(["patterns/mvc.md"]),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let chain = resolver.resolve(&[catalog.get("rails.md").unwrap()]);
        assert_eq!(names(&chain), vec!["web", "mvc", "rails"]);
    }

    #[test]
    fn test_cycle_terminates_with_each_once() {
        let catalog = ProfileCatalog::from_profiles([
            framework("a.md", "a").with_extends(["b.md"]),
            framework("b.md", "b").with_extends(["a.md"]),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let a = catalog.get("a.md").unwrap();
        let b = catalog.get("b.md").unwrap();
        let chain = resolver.resolve(&[a, b]);

        let mut sorted = names(&chain);
        sorted.sort();
        assert_eq!(sorted, vec!["a", "b"]);
    }

    #[test]
    fn test_self_extension() {
        let catalog =
            ProfileCatalog::from_profiles([framework("loop.md", "loop").with_extends(["loop.md"])]);
        let resolver = ProfileResolver::new(&catalog);

        let chain = resolver.resolve(&[catalog.get("loop.md").unwrap()]);
        assert_eq!(names(&chain), vec!["loop"]);
    }

    #[test]
    fn test_missing_parent_is_skipped_with_warning() {
        let catalog = ProfileCatalog::from_profiles([
            Profile::new("patterns/web.md", ProfileKind::Pattern, "web"),
            framework("flask.md", "flask").with_extends(["patterns/missing.md", "patterns/web.md"]),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let chain = resolver.resolve(&[catalog.get("flask.md").unwrap()]);
        assert_eq!(names(&chain), vec!["web", "flask"]);
        assert_eq!(
            chain.warnings(),
            &[ResolutionWarning::MissingParent {
                profile: "flask.md".into(),
                target: "patterns/missing.md".into(),
            }]
        );
    }

    #[test]
    fn test_seed_order_by_kind_hierarchy() {
        let catalog = ProfileCatalog::from_profiles([
            framework("express.md", "express"),
            Profile::new("systems/redis.md", ProfileKind::System, "redis"),
            Profile::new("patterns/cache.md", ProfileKind::Pattern, "cache"),
            Profile::new("node/_base.md", ProfileKind::Language, "node"),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let matched: Vec<_> = ["express.md", "systems/redis.md", "patterns/cache.md", "node/_base.md"]
            .iter()
            .map(|p| catalog.get(p).unwrap())
            .collect();
        let chain = resolver.resolve(&matched);
        assert_eq!(names(&chain), vec!["cache", "node", "redis", "express"]);
    }

    #[test]
    fn test_matched_base_not_duplicated() {
        let catalog = ProfileCatalog::from_profiles([
            Profile::new("python/_base.md", ProfileKind::Language, "python"),
            framework("django.md", "django").with_keywords(["django", "python"]),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let matched = [
            catalog.get("django.md").unwrap(),
            catalog.get("python/_base.md").unwrap(),
        ];
        let chain = resolver.resolve(&matched);
        assert_eq!(names(&chain), vec!["python", "django"]);
    }

    #[test]
    fn test_missing_language_base_warns() {
        let catalog = ProfileCatalog::from_profiles([
            framework("gin.md", "gin").with_keywords(["gin", "Go"])
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let chain = resolver.resolve(&[catalog.get("gin.md").unwrap()]);
        assert_eq!(names(&chain), vec!["gin"]);
        assert_eq!(
            chain.warnings(),
            &[ResolutionWarning::MissingLanguageBase {
                language: "go".into(),
                path: "go/_base.md".into(),
            }]
        );
    }

    #[test]
    fn test_only_frameworks_imply_bases() {
        let catalog = ProfileCatalog::from_profiles([
            Profile::new("python/_base.md", ProfileKind::Language, "python"),
            Profile::new("patterns/scripting.md", ProfileKind::Pattern, "scripting")
                .with_keywords(["scripting", "python"]),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let chain = resolver.resolve(&[catalog.get("patterns/scripting.md").unwrap()]);
        assert_eq!(names(&chain), vec!["scripting"]);
    }

    #[test]
    fn test_bases_precede_in_discovery_order() {
        let catalog = ProfileCatalog::from_profiles([
            Profile::new("javascript/_base.md", ProfileKind::Language, "javascript"),
            Profile::new("typescript/_base.md", ProfileKind::Language, "typescript")
                .with_extends(["javascript/_base.md"]),
            framework("nextjs.md", "nextjs").with_keywords(["next", "typescript", "javascript"]),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let chain = resolver.resolve(&[catalog.get("nextjs.md").unwrap()]);
        assert_eq!(names(&chain), vec!["javascript", "typescript", "nextjs"]);
    }

    #[test]
    fn test_base_parent_already_in_chain_moves_forward() {
        let catalog = ProfileCatalog::from_profiles([
            Profile::new("patterns/typing.md", ProfileKind::Pattern, "typing"),
            Profile::new("python/_base.md", ProfileKind::Language, "python")
                .with_extends(["patterns/typing.md"]),
            framework("django.md", "django").with_keywords(["django", "python"]),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let matched = [
            catalog.get("django.md").unwrap(),
            catalog.get("patterns/typing.md").unwrap(),
        ];
        let chain = resolver.resolve(&matched);
        assert_eq!(names(&chain), vec!["typing", "python", "django"]);
    }

    #[test]
    fn test_base_placed_by_extends_precedes_implying_framework() {
        let catalog = ProfileCatalog::from_profiles([
            Profile::new("python/_base.md", ProfileKind::Language, "python"),
            framework("flask.md", "flask").with_keywords(["flask", "python"]),
            framework("django.md", "django").with_extends(["python/_base.md"]),
        ]);
        let resolver = ProfileResolver::new(&catalog);

        let matched = [
            catalog.get("flask.md").unwrap(),
            catalog.get("django.md").unwrap(),
        ];
        let chain = resolver.resolve(&matched);
        assert_eq!(names(&chain), vec!["python", "flask", "django"]);
        assert!(chain.warnings().is_empty());
    }

    #[test]
    fn test_custom_base_languages() {
        let catalog = ProfileCatalog::from_profiles([
            Profile::new("kotlin/_base.md", ProfileKind::Language, "kotlin"),
            framework("ktor.md", "ktor").with_keywords(["ktor", "kotlin"]),
        ]);

        let default_chain =
            ProfileResolver::new(&catalog).resolve(&[catalog.get("ktor.md").unwrap()]);
        assert_eq!(names(&default_chain), vec!["ktor"]);

        let chain = ProfileResolver::new(&catalog)
            .with_base_languages(["Kotlin"])
            .resolve(&[catalog.get("ktor.md").unwrap()]);
        assert_eq!(names(&chain), vec!["kotlin", "ktor"]);
    }

    #[test]
    fn test_empty_matched_yields_empty_chain() {
        let catalog = ProfileCatalog::empty();
        let chain = ProfileResolver::new(&catalog).resolve(&[]);
        assert!(chain.is_empty());
        assert_eq!(chain.merged_guidelines(), "");
    }
}
