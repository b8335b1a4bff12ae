//! rapid-pagerank CLI - rank the pages of a link matrix file.
//!
//! # Usage
//!
//! ```bash
//! # Rank the 0/1 adjacency matrix in connectivity.txt
//! rapid-pagerank connectivity.txt
//!
//! # Different damping, JSON output, no input echo
//! rapid-pagerank links.txt --damping 0.9 --format json
//!
//! # Settings from a JSON file; flags still win
//! rapid-pagerank links.txt --config rank.json --pages 4
//! ```
//!
//! Any failure prints a one-line diagnostic to stdout and exits with 1.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rapid_pagerank::io::{read_links, render_json, render_report};
use rapid_pagerank::{DenseMatrix, RankConfig, RankEngine};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rapid-pagerank")]
#[command(about = "Rank pages of a small link graph with PageRank", long_about = None)]
struct Cli {
    /// Whitespace separated n×n 0/1 link matrix, row-major
    #[arg(default_value = "connectivity.txt")]
    input: PathBuf,

    /// JSON file with ranking settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Probability of following a link instead of teleporting
    #[arg(short, long)]
    damping: Option<f64>,

    /// Give up after this many power-iteration steps
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Entrywise convergence tolerance
    #[arg(long)]
    tolerance: Option<f64>,

    /// Require exactly this many pages
    #[arg(long)]
    pages: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Skip echoing the input matrix (text format only)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rapid_pagerank=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Error : {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli)?;
    let engine = RankEngine::new(config)?;

    let values = read_links(&cli.input, engine.config().max_input_values)?;
    info!(input = %cli.input.display(), values = values.len(), "loaded links");
    let links = DenseMatrix::from_flat(&values)?;

    let result = engine.rank(links.clone())?;
    debug!(
        iterations = result.iterations,
        delta = result.delta,
        "ranking finished"
    );

    match cli.format {
        OutputFormat::Text if cli.quiet => Ok(format!("Rank Result \n{}", result.format_ranked())),
        OutputFormat::Text => Ok(render_report(&links, &result)),
        OutputFormat::Json => {
            let mut json = render_json(&result)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn load_config(cli: &Cli) -> Result<RankConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => RankConfig::default(),
    };

    if let Some(damping) = cli.damping {
        config = config.with_damping(damping);
    }
    if let Some(max_iterations) = cli.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }
    if let Some(tolerance) = cli.tolerance {
        config = config.with_tolerance(tolerance);
    }
    if let Some(pages) = cli.pages {
        config = config.with_page_count(pages);
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<RankConfig> {
    RankConfig::from_json_file(path)
        .with_context(|| format!("loading config {}", path.display()))
}
