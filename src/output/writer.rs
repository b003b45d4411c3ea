use std::io::{self, Write};

use serde::Serialize;

use crate::area::Area;
use crate::cli::OutputFormat;
use crate::profile::{
    MatchReason, Profile, ProfileCatalog, ProfileChain, ResolutionWarning, SkippedProfile,
};
use crate::review::{MatchInfo, MatchedProfile};

/// Writes command results as plain text or as a single JSON document.
///
/// Styled terminal output lives in `cli::Display`; this writer only covers the
/// machine-readable forms and the unstyled text used for piping.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn emit_catalog(&self, catalog: &ProfileCatalog) {
        self.write_json(&CatalogOutput::from(catalog));
    }

    pub fn emit_matches(&self, infos: &[MatchInfo]) {
        self.write_json(&infos);
    }

    pub fn emit_debug(&self, output: &DebugOutput) {
        self.write_json(output);
    }

    /// Emit text meant to be consumed verbatim (guidelines, prompts).
    pub fn emit_document(&self, area: &Area, chain: &ProfileChain<'_>, text: &str) {
        match self.format {
            OutputFormat::Text => {
                let mut stdout = io::stdout().lock();
                let _ = writeln!(stdout, "{}", text);
                let _ = stdout.flush();
            }
            OutputFormat::Json => {
                let output = DocumentOutput {
                    area: area.name.clone(),
                    chain: chain.names().into_iter().map(String::from).collect(),
                    text: text.to_string(),
                };
                self.write_json(&output);
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{}", json);
            let _ = stdout.flush();
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogOutput {
    pub profiles: Vec<MatchedProfile>,
    pub skipped: Vec<SkippedProfile>,
}

impl From<&ProfileCatalog> for CatalogOutput {
    fn from(catalog: &ProfileCatalog) -> Self {
        Self {
            profiles: catalog.iter().map(MatchedProfile::from).collect(),
            skipped: catalog.skipped().to_vec(),
        }
    }
}

/// Structured form of the debug view for one area.
#[derive(Debug, Clone, Serialize)]
pub struct DebugOutput {
    pub area: String,
    pub technologies: Vec<String>,
    pub matched: Vec<ExplainedMatch>,
    pub chain: Vec<String>,
    pub warnings: Vec<ResolutionWarning>,
}

impl DebugOutput {
    pub fn new(
        area: &Area,
        technologies: Vec<String>,
        explained: &[(&Profile, MatchReason)],
        chain: &ProfileChain<'_>,
    ) -> Self {
        Self {
            area: area.name.clone(),
            technologies,
            matched: explained
                .iter()
                .map(|(profile, reason)| ExplainedMatch {
                    profile: MatchedProfile::from(*profile),
                    reason: reason.clone(),
                })
                .collect(),
            chain: chain.names().into_iter().map(String::from).collect(),
            warnings: chain.warnings().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainedMatch {
    #[serde(flatten)]
    pub profile: MatchedProfile,
    pub reason: MatchReason,
}

#[derive(Debug, Clone, Serialize)]
struct DocumentOutput {
    area: String,
    chain: Vec<String>,
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ProfileKind, ProfileResolver};

    fn catalog() -> ProfileCatalog {
        ProfileCatalog::from_profiles([
            Profile::new("python/_base.md", ProfileKind::Language, "python"),
            Profile::new("django.md", ProfileKind::Framework, "django")
                .with_keywords(["django", "python"])
                .with_extends(["missing.md"]),
        ])
    }

    #[test]
    fn test_catalog_output() {
        let catalog = catalog();
        let output = CatalogOutput::from(&catalog);

        assert_eq!(output.profiles.len(), 2);
        assert_eq!(output.profiles[0].path, "django.md");
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn test_debug_output_serialization() {
        let catalog = catalog();
        let area = Area::new("API", "backend");
        let django = catalog.get("django.md").unwrap();
        let chain = ProfileResolver::new(&catalog).resolve(&[django]);

        let output = DebugOutput::new(
            &area,
            vec!["django".into()],
            &[(django, MatchReason::Name)],
            &chain,
        );
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["area"], "API");
        assert_eq!(json["matched"][0]["name"], "django");
        assert_eq!(json["matched"][0]["type"], "framework");
        assert_eq!(json["matched"][0]["reason"]["rule"], "name");
        assert_eq!(json["chain"][0], "python");
        assert_eq!(json["warnings"][0]["kind"], "missing_parent");
    }
}
