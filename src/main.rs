// src/main.rs
mod cli;
mod extractors;
mod report;
mod storage;
mod utils;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use cli::{OptionId, OptionRegistry};
use extractors::{PatternTable, SectionExtractor, PATTERNS_ENV};
use utils::error::{StorageError, UsageError};
use utils::AppError;

/// Loads the log named on the command line. With Version requested a
/// missing file is fine, since nothing is extracted from it.
fn load_log_text(input_file_name: &str, registry: &OptionRegistry) -> Result<String, AppError> {
    if input_file_name.is_empty() {
        return Err(UsageError::MissingInputFile.into());
    }
    match storage::read_log(Path::new(input_file_name)) {
        Ok(text) => Ok(text),
        Err(e) if registry.is_requested(OptionId::Version) => {
            tracing::debug!("Ignoring unreadable input while printing version: {}", e);
            Ok(String::new())
        }
        Err(StorageError::Read { path, source }) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(UsageError::InputNotFound(path).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn run() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let (registry, input_file_name) = cli::parse(std::env::args_os())?;

    // 2. Section patterns, optionally overridden from JDT_PATTERNS
    let patterns_path = std::env::var_os(PATTERNS_ENV).map(PathBuf::from);
    let table = PatternTable::load(patterns_path.as_deref())?;
    let extractor = SectionExtractor::new(&table);

    // 3. Load the log and pull out the requested sections
    let log_text = load_log_text(&input_file_name, &registry)?;
    tracing::info!("Loaded {} ({} bytes)", input_file_name, log_text.len());
    let results = extractor.extract(&log_text, &registry);

    // 4. Console or per-section files
    report::output_results(&results, &registry, &mut std::io::stdout().lock())
}

fn main() -> ExitCode {
    let tic = Instant::now();

    // Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    match run() {
        Ok(()) => {
            println!("Requests served in : {} sec.", tic.elapsed().as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
