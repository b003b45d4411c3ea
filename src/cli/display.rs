use console::{Style, style};

use crate::area::Area;
use crate::profile::{Profile, ProfileCatalog, ProfileKind};
use crate::review::MatchInfo;

pub struct Display;

impl Display {
    pub fn new() -> Self {
        Self
    }

    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", style(text).bold().cyan());
        println!("{}", style("═".repeat(60)).dim());
        println!();
    }

    pub fn print_catalog(&self, catalog: &ProfileCatalog) {
        if catalog.is_empty() {
            println!("{}", style("No review profiles found.").dim());
        } else {
            let counts: Vec<String> = ProfileKind::ALL
                .iter()
                .map(|kind| {
                    let n = catalog.by_kind(*kind).count();
                    format!("{}: {}", kind, self.kind_style(*kind).apply_to(n))
                })
                .collect();
            println!("{}", counts.join("  "));
            println!();

            println!(
                "{:<20} {:<10} {:<32} {:>8}",
                style("Name").bold(),
                style("Type").bold(),
                style("Path").bold(),
                style("Priority").bold()
            );
            println!("{}", style("─".repeat(73)).dim());

            for profile in catalog.iter() {
                self.print_profile_row(profile);
            }
        }

        if !catalog.skipped().is_empty() {
            println!();
            println!(
                "{}",
                style(format!("Skipped ({}):", catalog.skipped().len())).bold()
            );
            for skipped in catalog.skipped() {
                self.print_warning(&format!("{}: {}", skipped.path, skipped.reason));
            }
        }
    }

    fn print_profile_row(&self, profile: &Profile) {
        println!(
            "{:<20} {:<10} {:<32} {:>8}",
            profile.name,
            self.kind_style(profile.kind).apply_to(profile.kind.as_str()),
            profile.path,
            profile.priority
        );
        if profile.keywords.len() > 1 || profile.keywords.first() != Some(&profile.name) {
            println!(
                "    {}",
                style(format!("keywords: {}", profile.keywords.join(", "))).dim()
            );
        }
    }

    pub fn print_match_info(&self, area: &Area, info: &MatchInfo) {
        println!(
            "{}  {}",
            style(&area.name).bold(),
            style(if area.area_type.is_empty() {
                "-"
            } else {
                area.area_type.as_str()
            })
            .dim()
        );

        if info.matched.is_empty() {
            println!(
                "    {}",
                style("No specific profiles matched, using generic review guidelines").dim()
            );
            println!();
            return;
        }

        let matched: Vec<String> = info
            .matched
            .iter()
            .map(|p| format!("{} ({})", p.name, p.kind))
            .collect();
        println!("    Matched: {}", matched.join(", "));

        let arrow = style(" → ").dim().to_string();
        let chain: Vec<String> = info
            .chain
            .iter()
            .map(|n| style(n).cyan().to_string())
            .collect();
        println!("    Chain:   {}", chain.join(arrow.as_str()));
        println!(
            "    {}",
            style(format!("~{} review guidelines", info.guideline_count)).green()
        );
        println!();
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }

    pub fn print_warning(&self, message: &str) {
        println!("{} {}", style("!").yellow().bold(), message);
    }

    pub fn print_info(&self, message: &str) {
        println!("{} {}", style("→").cyan(), message);
    }

    fn kind_style(&self, kind: ProfileKind) -> Style {
        match kind {
            ProfileKind::Pattern => Style::new().magenta(),
            ProfileKind::Language => Style::new().blue(),
            ProfileKind::System => Style::new().yellow(),
            ProfileKind::Framework => Style::new().green(),
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
