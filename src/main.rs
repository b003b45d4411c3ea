use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use review_profiles::area::{Area, AreaManifest};
use review_profiles::cli::{AreaArgs, Cli, Commands, Display};
use review_profiles::config::{CONFIG_FILE_NAME, ReviewConfig};
use review_profiles::error::{ReviewError, Result};
use review_profiles::output::{DebugOutput, OutputWriter};
use review_profiles::profile::TechnologySet;
use review_profiles::review::ReviewEnhancer;

/// Context for command output handling.
struct OutputContext<'a> {
    display: &'a Display,
    writer: &'a OutputWriter,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Display::new().print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("review_profiles=debug")
    } else {
        EnvFilter::new("review_profiles=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let display = Display::new();
    let writer = OutputWriter::new(cli.output);
    let out = OutputContext {
        display: &display,
        writer: &writer,
    };

    let config = load_config(cli.config, cli.profiles_dir).await?;
    let enhancer = ReviewEnhancer::initialize(&config).await;

    match cli.command {
        Commands::List => cmd_list(&out, &enhancer),
        Commands::Match { area } => cmd_match(&out, &enhancer, &area).await,
        Commands::Debug { area } => cmd_debug(&out, &enhancer, &area).await,
        Commands::Guidelines { area } => cmd_guidelines(&out, &enhancer, &area).await,
        Commands::Enhance { area, prompt } => {
            cmd_enhance(&out, &enhancer, &area, prompt.as_deref()).await
        }
    }
}

async fn load_config(path: Option<PathBuf>, profiles_dir: Option<PathBuf>) -> Result<ReviewConfig> {
    let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let config = ReviewConfig::load(&path).await?;

    match profiles_dir {
        Some(dir) => {
            let config = config.with_profiles_dir(dir);
            config.validate()?;
            Ok(config)
        }
        None => Ok(config),
    }
}

/// Areas named by the command line: manifest areas, or the single inline area.
async fn select_areas(args: &AreaArgs) -> Result<Vec<Area>> {
    if let Some(path) = &args.areas {
        let manifest = AreaManifest::load(path).await?;
        let areas = manifest.select(args.area.as_deref())?;
        return Ok(areas.into_iter().cloned().collect());
    }

    args.inline_area()
        .map(|area| vec![area])
        .ok_or(ReviewError::NoAreaSelected)
}

fn cmd_list(out: &OutputContext<'_>, enhancer: &ReviewEnhancer) -> Result<()> {
    if out.writer.is_json() {
        out.writer.emit_catalog(enhancer.catalog());
    } else {
        out.display.print_header("Review Profiles");
        out.display.print_catalog(enhancer.catalog());
    }
    Ok(())
}

async fn cmd_match(
    out: &OutputContext<'_>,
    enhancer: &ReviewEnhancer,
    args: &AreaArgs,
) -> Result<()> {
    let areas = select_areas(args).await?;
    let infos: Vec<_> = areas.iter().map(|a| enhancer.match_info(a)).collect();

    if out.writer.is_json() {
        out.writer.emit_matches(&infos);
    } else {
        out.display.print_header("Profile Matches");
        for (area, info) in areas.iter().zip(&infos) {
            out.display.print_match_info(area, info);
        }
    }
    Ok(())
}

async fn cmd_debug(
    out: &OutputContext<'_>,
    enhancer: &ReviewEnhancer,
    args: &AreaArgs,
) -> Result<()> {
    for area in select_areas(args).await? {
        if out.writer.is_json() {
            let explained = enhancer.matcher().explain(&area);
            let matched: Vec<_> = explained.iter().map(|(p, _)| *p).collect();
            let chain = enhancer.resolver().resolve(&matched);
            let technologies = TechnologySet::from_area(&area)
                .iter()
                .map(String::from)
                .collect();
            out.writer
                .emit_debug(&DebugOutput::new(&area, technologies, &explained, &chain));
        } else {
            println!("{}", enhancer.debug_match(&area));
        }
    }
    Ok(())
}

async fn cmd_guidelines(
    out: &OutputContext<'_>,
    enhancer: &ReviewEnhancer,
    args: &AreaArgs,
) -> Result<()> {
    for area in select_areas(args).await? {
        let (_, chain) = enhancer.resolve(&area);
        if chain.is_empty() && !out.writer.is_json() {
            out.display.print_info(&format!(
                "No specific profiles matched for {}, using generic review guidelines",
                area.name
            ));
            continue;
        }
        out.writer
            .emit_document(&area, &chain, &chain.merged_guidelines());
    }
    Ok(())
}

async fn cmd_enhance(
    out: &OutputContext<'_>,
    enhancer: &ReviewEnhancer,
    args: &AreaArgs,
    prompt: Option<&std::path::Path>,
) -> Result<()> {
    let base_prompt = match prompt {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReviewError::read(path, e))?,
        None => String::new(),
    };

    for area in select_areas(args).await? {
        let (enhanced, chain) = enhancer.enhance(&area, &base_prompt);
        out.writer.emit_document(&area, &chain, &enhanced);
    }
    Ok(())
}
