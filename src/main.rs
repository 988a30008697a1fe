mod analyze;
mod cli;
mod config;
mod error;
mod history;
mod report;
mod scoring;
mod types;

use crate::error::{QualityError, Result};
use crate::history::HistoryStore;
use crate::report::text::Reporter;
use crate::scoring::ScoreGrade;
use crate::types::report::QualityReport;
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    // clap exits with 2 on its own for usage errors
}

const SOURCE_EXTENSION: &str = "py";

fn validate_source_path(path: &Path) -> Result<()> {
    let is_python = path
        .extension()
        .is_some_and(|extension| extension == SOURCE_EXTENSION);
    if path.is_file() && is_python {
        Ok(())
    } else {
        Err(QualityError::InvalidSourceFile(path.display().to_string()))
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    validate_source_path(&cli.path)?;

    let cwd = std::env::current_dir()?;
    let config = config::load_config(&cwd)?;

    let metrics = analyze::analyze_file(&cli.path)?;
    let score = scoring::score(&metrics);
    info!(path = %cli.path.display(), score, "analysis complete");

    let store = HistoryStore::resolve(&cwd, &config.history.file);
    debug!(history = %store.path().display(), "recording score");
    store.save(score);
    let stats = store.stats();

    let file = cli
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.path.display().to_string());
    let quality_report = QualityReport {
        file,
        metrics,
        score,
        grade: ScoreGrade::from_score(score),
        history: stats,
        generated_at: Utc::now().to_rfc3339(),
    };

    let reporter = Reporter::stdout(config.output.color && !cli.no_color);
    let output_format = match cli.format {
        cli::ReportFormat::Text => report::OutputFormat::Text,
        cli::ReportFormat::Json => report::OutputFormat::Json,
    };
    let rendered = report::render(&quality_report, output_format, &reporter)?;
    reporter.print(&rendered)?;
    Ok(())
}

fn main() {
    let cli = cli::Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    match run(&cli) {
        Ok(()) => std::process::exit(exit_code::SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::FAILURE);
        }
    }
}
