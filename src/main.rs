//! MPS batch order builder
//!
//! Interactive command-line tool filling the audio digitization paperwork
//! of an MPS batch order from AWM call numbers.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::{self, Cursor};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mps_batch_order::{
    config::AppConfig,
    error::{AppError, ErrorCode},
    services::{
        BatchService, ChoiceProvider, ConsolePrompt, CsvWorkbookSink, LibraryCloudClient,
        OrderSession, SessionOutcome,
    },
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Call numbers to order, e.g. "AWM LP 2000-2010, AWM SC 5"; asked for when omitted
    #[arg(long)]
    call_numbers: Option<String>,

    /// Directory receiving the batch files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// LibraryCloud API root
    #[arg(long)]
    catalog_url: Option<String>,

    /// Read every answer, one per line, from this file instead of the terminal
    #[arg(long)]
    answers: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

/// What the run printed at the end
#[derive(Debug, Serialize)]
struct RunSummary {
    #[serde(flatten)]
    outcome: SessionOutcome,
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ErrorCode::Success.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<AppError>()
                .map(AppError::code)
                .unwrap_or(ErrorCode::Failure)
                .into()
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;
    if let Some(dir) = &cli.output_dir {
        config.batch.output_dir = dir.clone();
    }
    if let Some(url) = &cli.catalog_url {
        config.catalog.base_url = url.clone();
    }

    init_tracing(&config);
    tracing::info!("Starting MPS batch order builder v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Catalog: {}", config.catalog.base_url);

    let catalog = LibraryCloudClient::new(&config.catalog)?;
    let session = OrderSession::new(
        BatchService::new(catalog, &config.batch),
        config.toc_export_path(),
    );

    // Answer files echo their prompts to stderr so stdout only carries the summary
    let mut prompt: Box<dyn ChoiceProvider> = match &cli.answers {
        Some(path) => {
            let answers = std::fs::read_to_string(path)
                .map_err(AppError::from)
                .with_context(|| format!("Failed to read answers from {}", path.display()))?;
            Box::new(ConsolePrompt::new(Cursor::new(answers), io::stderr()))
        }
        None => Box::new(ConsolePrompt::stdio()),
    };

    let mut sink = CsvWorkbookSink::new(&config.batch.output_dir);
    let today = chrono::Local::now().date_naive();
    let outcome = session
        .run(&mut *prompt, cli.call_numbers.as_deref(), today, &mut sink)
        .await?;

    let summary = RunSummary {
        outcome,
        files: sink.written().to_vec(),
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mps_batch_order={}", config.logging.level).into());
    let json = config.logging.format == "json";

    // Logs stay on stderr, prompts and the summary use stdout
    tracing_subscriber::registry()
        .with(filter)
        .with((!json).then(|| fmt::layer().with_writer(io::stderr)))
        .with(json.then(|| fmt::layer().json().with_writer(io::stderr)))
        .init();
}

fn print_summary(summary: &RunSummary) {
    let batch = &summary.outcome.batch;

    println!();
    println!("Batch name: {}", batch.metadata.batch_name);
    println!("Inventory rows: {}", batch.rows_written);
    if batch.discarded_records > 0 {
        println!("Records without an item label: {}", batch.discarded_records);
    }
    if !batch.failed_terms.is_empty() {
        let terms: Vec<&str> = batch.failed_terms.iter().map(|t| t.as_str()).collect();
        println!("Call numbers not searched: {}", terms.join(", "));
    }
    for file in &summary.files {
        println!("All changes saved to '{}'.", file.display());
    }
    if let Some(path) = &summary.outcome.toc_export {
        println!("Table of contents: {}", path.display());
    }
}
