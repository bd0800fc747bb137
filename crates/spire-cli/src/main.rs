//! Spire CLI - monthly Sensor Tower download report generator.

mod export;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use spire_api::{generate_report, SensorTowerClient};
use spire_core::{ReportConfig, ReportMonth};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spire")]
#[command(
    about = "Query Sensor Tower for estimated app downloads and build a monthly report",
    long_about = None
)]
struct Cli {
    /// Report month, yyyy-mm. Defaults to the previous calendar month.
    #[arg(long, value_name = "YYYY-MM")]
    date: Option<String>,

    /// Store category to query
    #[arg(long, default_value = "6014")]
    category: String,

    /// Minimum downloads for an app to be considered
    #[arg(long, default_value_t = 300_000)]
    min_download: i64,

    /// Minimum contribution ratio, in (0, 1)
    #[arg(long, default_value_t = 0.5)]
    min_contribution: f64,

    /// File holding the API auth token
    #[arg(long, default_value = "token.txt")]
    token_file: PathBuf,

    /// Directory the report file is written to
    #[arg(long, default_value = "results")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let token = load_token(&cli.token_file)?;

    println!(
        "Querying app comparison sales of the month {} (category {})...",
        config.month, config.category
    );
    let client = SensorTowerClient::new(token)?;
    let rows = generate_report(&client, &config).await;
    tracing::debug!(rows = rows.len(), "pipeline finished");

    if rows.is_empty() {
        println!("No data found or error occurred.");
        return Ok(());
    }

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create output directory {}", cli.out_dir.display()))?;
    let path = cli.out_dir.join(format!("ST-{}.csv", config.month));
    export::write_report(&path, &rows)?;
    println!("Wrote {} ({} rows)", path.display(), rows.len());

    Ok(())
}

/// Resolve CLI flags into the explicit run configuration the pipeline takes.
fn resolve_config(cli: &Cli) -> Result<ReportConfig> {
    let month = match &cli.date {
        Some(raw) => ReportMonth::parse(raw)?,
        None => ReportMonth::previous(Local::now().date_naive()),
    };

    let config = ReportConfig {
        month,
        category: cli.category.clone(),
        min_download: cli.min_download,
        min_contribution: cli.min_contribution,
    };
    config.validate()?;
    Ok(config)
}

/// Read the auth token from its file. A missing or empty token file is
/// fatal; nothing works without credentials.
fn load_token(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read token file {}", path.display()))?;
    let token = raw.trim();
    if token.is_empty() {
        bail!("token file {} is empty", path.display());
    }
    Ok(token.to_string())
}
