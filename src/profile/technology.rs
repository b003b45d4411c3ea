//! Technology token normalization.
//!
//! Every comparison between an area's technologies and a profile's tokens goes
//! through [`normalize_token`], applied to both sides.

use std::collections::BTreeSet;

use crate::area::Area;

/// Normalize a token for comparison.
///
/// Lowercases, drops everything that is not an ASCII letter or digit, then
/// rewrites a trailing `js` to `javascript` ("React.js" -> "reactjavascript",
/// "JS" -> "javascript"). The alias is applied to any token ending in `js`,
/// including names where it is not a JavaScript suffix ("Objs" ->
/// "objavascript"); this is a known over-broad heuristic.
pub fn normalize_token(token: &str) -> String {
    let mut normalized: String = token
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if normalized.ends_with("js") {
        normalized.truncate(normalized.len() - 2);
        normalized.push_str("javascript");
    }
    normalized
}

/// Strip a trailing version suffix made of digits and dots ("Python3.12" ->
/// "Python"). Returns `None` when there is nothing to strip.
fn strip_version_suffix(name: &str) -> Option<&str> {
    let stripped = name
        .trim_end_matches(|c: char| c.is_ascii_digit() || c == '.')
        .trim();
    (stripped != name).then_some(stripped)
}

/// Normalized technology tokens declared by an area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechnologySet {
    tokens: BTreeSet<String>,
}

impl TechnologySet {
    pub fn from_area(area: &Area) -> Self {
        Self::from_names(area.technologies.iter().map(|t| t.name.as_str()))
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tokens = BTreeSet::new();
        for name in names {
            insert_non_empty(&mut tokens, normalize_token(name));

            if let Some(without_version) = strip_version_suffix(name) {
                insert_non_empty(&mut tokens, normalize_token(without_version));
            }
        }
        Self { tokens }
    }

    /// Check membership of a raw candidate token (normalized before lookup).
    pub fn contains(&self, candidate: &str) -> bool {
        self.tokens.contains(&normalize_token(candidate))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

fn insert_non_empty(tokens: &mut BTreeSet<String>, token: String) {
    if !token.is_empty() {
        tokens.insert(token);
    }
}
