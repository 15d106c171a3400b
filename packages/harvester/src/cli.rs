//! Command-line interface for the harvester.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{CPIH_DATASET_ID, CPIH_FILE_STEM, DEFAULT_SEARCH_TERMS, ONS_API_URL};
use crate::downloads::download_latest;
use crate::error::Result;
use crate::harvester::{download_latest_series, run_extraction};
use crate::http::create_client;
use crate::staging::Staging;

/// ONS Harvester - Download ASHE earnings datasets from the ONS beta API.
#[derive(Parser)]
#[command(name = "ons-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full extraction pass into the staging area.
    Extract {
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
    },

    /// Download only the newest observations of a single-series dataset.
    Latest {
        /// Dataset id (default: the CPIH price index)
        #[arg(default_value = CPIH_DATASET_ID)]
        dataset_id: String,

        /// Staging root directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// API endpoint (default: the ONS beta API)
        #[arg(short, long, default_value = ONS_API_URL)]
        endpoint: String,

        /// File stem for the saved CSV (default: cpih for the CPIH
        /// dataset, otherwise the dataset id)
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            root,
            endpoint,
            terms,
        } => extract_command(&root, &endpoint, terms),
        Commands::Latest {
            dataset_id,
            root,
            endpoint,
            name,
        } => latest_command(&dataset_id, &root, &endpoint, name.as_deref()),
    }
}

/// Resolve search terms, falling back to the defaults.
fn search_terms(terms: Vec<String>) -> Vec<String> {
    if terms.is_empty() {
        DEFAULT_SEARCH_TERMS
            .iter()
            .map(|t| (*t).to_string())
            .collect()
    } else {
        terms
    }
}

/// File stem for a latest-value download.
fn latest_file_stem(dataset_id: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => name.to_string(),
        None if dataset_id == CPIH_DATASET_ID => CPIH_FILE_STEM.to_string(),
        None => dataset_id.to_string(),
    }
}

/// Create a progress spinner in the house style.
fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the extract command.
fn extract_command(root: &std::path::Path, endpoint: &str, terms: Vec<String>) -> Result<()> {
    let staging = Staging::new(root);
    let terms = search_terms(terms);

    println!(
        "{} datasets matching [{}] into {}",
        style("Extracting").bold(),
        style(terms.join(", ")).cyan(),
        style(staging.root().display()).green()
    );
    println!();

    let client = create_client()?;
    let pb = spinner("Downloading latest CPIH observations...");

    let latest = match download_latest_series(&client, endpoint, &staging) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Resolving datasets and downloading files...");
    let report = match run_extraction(&client, endpoint, &terms, &staging) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

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

/// Execute the latest command.
fn latest_command(
    dataset_id: &str,
    root: &std::path::Path,
    endpoint: &str,
    name: Option<&str>,
) -> Result<()> {
    let staging = Staging::new(root);
    staging.ensure_layout()?;
    let target = staging.dimension_path(&latest_file_stem(dataset_id, name));

    println!(
        "{} latest observations for {}",
        style("Downloading").bold(),
        style(dataset_id).cyan()
    );

    let client = create_client()?;
    let pb = spinner("Resolving latest version...");

    if let Err(e) = download_latest(&client, endpoint, dataset_id, &target) {
        pb.finish_and_clear();
        return Err(e);
    }
    pb.finish_and_clear();

    println!();
    println!("{} {}", style("Saved to:").green().bold(), target.display());
    Ok(())
}
