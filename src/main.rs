//! resolve-apply binary entry point

use anyhow::Result;
use clap::Parser;
use resolve_apply::core::config::ApplyConfig;
use resolve_apply::core::pipeline::{self, ApplyRequest};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Apply an AI-generated editing guide to a Resolve timeline as colored
/// markers
#[derive(Parser, Debug)]
#[command(name = "resolve-apply", version, about)]
struct Cli {
    /// Path to the editing guide JSON (or set EDITING_GUIDE_JSON)
    input: Option<PathBuf>,

    /// Project name override; defaults to the guide's, then the file stem
    #[arg(long)]
    project_name: Option<String>,

    /// Plan and log everything without calling the editing host
    #[arg(long)]
    dry_run: bool,

    /// Color grade preset name advertised in marker notes
    #[arg(long)]
    color_preset: Option<String>,

    /// Vignette preset name advertised in marker notes
    #[arg(long)]
    vignette_preset: Option<String>,

    /// Settings file (JSON); a missing file falls back to defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resolve_apply=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let input = match cli
        .input
        .or_else(|| std::env::var("EDITING_GUIDE_JSON").ok().map(PathBuf::from))
    {
        Some(path) => path,
        None => {
            eprintln!("No editing guide given. Pass a path or set EDITING_GUIDE_JSON.");
            std::process::exit(2);
        }
    };

    let mut config = match &cli.config {
        Some(path) => match ApplyConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not load config {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => ApplyConfig::default(),
    };
    if let Some(preset) = cli.color_preset {
        config.color_preset = preset;
    }
    if let Some(preset) = cli.vignette_preset {
        config.vignette_preset = preset;
    }

    let request = ApplyRequest {
        input,
        project_name: cli.project_name,
        dry_run: cli.dry_run,
        config,
    };

    let outcome = pipeline::run(&request)?;

    println!(
        "Processed {} edits: {} markers added, {} todos logged. Run log: {}",
        outcome.edits_processed,
        outcome.markers_added,
        outcome.todos_logged,
        outcome.run_log_path.display()
    );

    Ok(())
}
