// src/main.rs
use std::path::{Path, PathBuf};

use clap::Parser;
use fin_extractor::document::load_document;
use fin_extractor::extractors::{extract_document, KeywordTable};
use fin_extractor::storage::StorageManager;
use fin_extractor::utils::{self, AppError};

const KEYWORDS_ENV: &str = "FIN_EXTRACTOR_KEYWORDS";

/// Command Line Interface for the financial figure extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Layout-step JSON documents (tables + text) to process
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Keyword alias file (JSON); falls back to $FIN_EXTRACTOR_KEYWORDS, then the built-in table
    #[arg(short, long)]
    keywords: Option<PathBuf>,

    /// Output directory for extraction reports
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Debug mode - save the document text with keyword hits highlighted
    #[arg(short, long)]
    debug: bool,

    /// Also print each report as JSON on stdout
    #[arg(long)]
    stdout: bool,
}

/// Resolves the keyword table: CLI flag, then environment, then defaults.
fn resolve_keywords(flag: Option<&Path>) -> Result<KeywordTable, AppError> {
    if let Some(path) = flag {
        tracing::debug!("Using keyword file from command-line argument: {}", path.display());
        return Ok(KeywordTable::load(path)?);
    }
    if let Ok(path) = std::env::var(KEYWORDS_ENV) {
        tracing::debug!("Using keyword file from {}: {}", KEYWORDS_ENV, path);
        return Ok(KeywordTable::load(Path::new(&path))?);
    }
    tracing::debug!("Using built-in keyword table");
    Ok(KeywordTable::default())
}

async fn process_document(
    path: &Path,
    keywords: &KeywordTable,
    storage: &StorageManager,
    args: &Args,
) -> Result<(), AppError> {
    let document = load_document(path).await?;
    let report = extract_document(&document, keywords);

    tracing::info!(
        "Extracted {} of {} quantities from {}",
        report.numeric_context.len(),
        keywords.len(),
        path.display()
    );
    if !report.missing.is_empty() {
        tracing::warn!("Not located in {}: {}", path.display(), report.missing.join(", "));
    }

    if args.debug {
        let debug_dir = storage.report_dir(&report, path).join("debug");
        std::fs::create_dir_all(&debug_dir)?;
        let debug_html_path = debug_dir.join("text_annotated.html");
        match utils::text_debug::create_debug_html(&document.text, &debug_html_path, keywords) {
            Ok(count) => tracing::info!("Created annotated debug HTML with {} keyword hits: {}", count, debug_html_path.display()),
            Err(e) => tracing::warn!("Failed to create debug HTML: {}", e),
        }
    }

    storage.save_report(&report, path)?;
    if let Err(e) = storage.save_report_metadata(&report, path) {
        tracing::error!("Failed to save report metadata: {}", e);
    }

    if args.stdout {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Processing(format!("Could not serialize report: {}", e)))?;
        println!("{}", json);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Resolve configuration and storage
    let keywords = resolve_keywords(args.keywords.as_deref())?;
    if keywords.is_empty() {
        return Err(AppError::Config("Keyword table defines no quantities".to_string()));
    }
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Process each document
    let mut success_count = 0;
    let mut failure_count = 0;

    for path in &args.input {
        tracing::info!("Processing document: {}", path.display());
        match process_document(path, &keywords, &storage, &args).await {
            Ok(()) => success_count += 1,
            Err(e) => {
                tracing::error!("Failed to process {}: {}", path.display(), e);
                failure_count += 1;
            }
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!("Failed to process any of {} documents", failure_count)));
    }

    Ok(())
}
