use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::area::{Area, Technology, TechnologyKind};

#[derive(Parser)]
#[command(name = "review-profiles")]
#[command(author, version, about = "Technology-specific review profiles for code-review prompts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Path to configuration file (default: review-profiles.toml)
    #[arg(long, global = true, env = "REVIEW_PROFILES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profiles directory (overrides profiles.dir from the configuration)
    #[arg(long, global = true, env = "REVIEW_PROFILES_DIR")]
    pub profiles_dir: Option<PathBuf>,
}

/// Output format for CLI results.
/// - Text: Human-readable text output (default)
/// - Json: JSON document on stdout
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all loaded profiles
    List,

    /// Show which profiles apply to each area
    Match {
        #[command(flatten)]
        area: AreaArgs,
    },

    /// Explain matching and resolution for one area
    Debug {
        #[command(flatten)]
        area: AreaArgs,
    },

    /// Print the merged guidelines for one area
    Guidelines {
        #[command(flatten)]
        area: AreaArgs,
    },

    /// Print a review prompt enhanced with the area's guidelines
    Enhance {
        #[command(flatten)]
        area: AreaArgs,

        /// Base prompt file (default: empty prompt)
        #[arg(long)]
        prompt: Option<PathBuf>,
    },
}

/// Area selection: a manifest file, or an area described inline.
#[derive(Args, Debug, Clone)]
pub struct AreaArgs {
    /// Area manifest produced by the analysis stage (JSON with functional_areas)
    #[arg(long, conflicts_with = "name")]
    pub areas: Option<PathBuf>,

    /// Select one area from the manifest by name
    #[arg(long, requires = "areas")]
    pub area: Option<String>,

    /// Inline area name
    #[arg(long)]
    pub name: Option<String>,

    /// Inline area type (backend, frontend, ...)
    #[arg(long, requires = "name")]
    pub area_type: Option<String>,

    /// Inline technology (repeatable)
    #[arg(long = "tech", requires = "name")]
    pub technologies: Vec<String>,
}

impl AreaArgs {
    /// Build the inline area, if one was described on the command line.
    pub fn inline_area(&self) -> Option<Area> {
        let name = self.name.as_ref()?;
        Some(
            Area::new(name.clone(), self.area_type.clone().unwrap_or_default()).with_technologies(
                self.technologies
                    .iter()
                    .map(|t| Technology::new(t.clone(), TechnologyKind::Other)),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_inline_area() {
        let cli = Cli::parse_from([
            "review-profiles",
            "match",
            "--name",
            "API",
            "--area-type",
            "backend",
            "--tech",
            "Django",
            "--tech",
            "Python3",
        ]);

        let Commands::Match { area } = cli.command else {
            panic!("expected match command");
        };
        let inline = area.inline_area().unwrap();
        assert_eq!(inline.name, "API");
        assert_eq!(inline.area_type, "backend");
        assert_eq!(inline.technology_names(), vec!["Django", "Python3"]);
    }

    #[test]
    fn test_areas_conflicts_with_name() {
        let result = Cli::try_parse_from([
            "review-profiles",
            "match",
            "--areas",
            "modules.json",
            "--name",
            "API",
        ]);
        assert!(result.is_err());
    }
}
