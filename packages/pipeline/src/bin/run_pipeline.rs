//! CLI entry point for the pipeline.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use ons_harvester::config::ONS_API_URL;
use ons_harvester::http::create_client;
use ons_harvester::{download_latest_series, run_extraction, Staging};
use ons_pipeline::error::Result;
use ons_pipeline::run_transform;

/// ONS Pipeline - Extract ONS datasets and clean them into silver tables.
#[derive(Parser)]
#[command(name = "ons-pipeline")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download datasets and dimension code lists into the staging area.
    Extract {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Clean the staged bronze tables into the silver area.
    Transform {
        /// Staging root directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Run extraction followed by the transform.
    Run {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Staging root directory (default: current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// API endpoint (default: the ONS beta API)
    #[arg(short, long, default_value = ONS_API_URL)]
    endpoint: String,

    /// Keyword term to match against dataset keywords (repeatable;
    /// default: ashe, earnings)
    #[arg(short, long = "term")]
    terms: Vec<String>,
}

fn main() {
    // Initialize tracing with WARN level by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { source } => extract_command(&source),
        Commands::Transform { root } => transform_command(&root),
        Commands::Run { source } => {
            extract_command(&source)?;
            transform_command(&source.root)
        }
    }
}

/// Resolve search terms, falling back to the harvester defaults.
fn search_terms(terms: &[String]) -> Vec<String> {
    if terms.is_empty() {
        ons_harvester::config::DEFAULT_SEARCH_TERMS
            .iter()
            .map(|t| (*t).to_string())
            .collect()
    } else {
        terms.to_vec()
    }
}

/// Execute the extract stage.
fn extract_command(source: &SourceArgs) -> Result<()> {
    let staging = Staging::new(&source.root);
    let terms = search_terms(&source.terms);

    println!(
        "{} datasets matching [{}] into {}",
        style("Extracting").bold(),
        style(terms.join(", ")).cyan(),
        style(staging.root().display()).green()
    );

    let client = create_client()?;
    let latest = download_latest_series(&client, &source.endpoint, &staging)?;
    let report = run_extraction(&client, &source.endpoint, &terms, &staging)?;

    println!("  Latest series: {}", style(latest.display()).green());
    println!("  Datasets: {}", report.datasets);
    println!("  Versions: {}", report.versions);
    println!("  Observation files: {}", report.observation_files.len());
    println!("  Dimension files: {}", report.dimension_files.len());
    if !report.skipped_dimensions.is_empty() {
        println!(
            "  Skipped dimensions: {}",
            style(report.skipped_dimensions.len()).yellow().bold()
        );
    }

    Ok(())
}

/// Execute the transform stage.
fn transform_command(root: &Path) -> Result<()> {
    let staging = Staging::new(root);

    println!(
        "{} staged tables in {}",
        style("Transforming").bold(),
        style(staging.root().display()).green()
    );

    let report = run_transform(&staging)?;

    println!("  Cleaned: {}", report.cleaned.len());
    println!("  Passed through: {}", report.passthrough.len());
    Ok(())
}
