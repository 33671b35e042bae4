// src/report/mod.rs
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::options::{OptionId, OptionRegistry};
use crate::extractors::ExtractionResult;
use crate::storage::StorageManager;
use crate::utils::error::StorageError;
use crate::utils::AppError;

const BANNER_RULE: &str = "########################################";

fn text_for(results: &[ExtractionResult], option: OptionId) -> &str {
    results
        .iter()
        .find(|r| r.option == option)
        .map(|r| r.text.as_str())
        .unwrap_or_default()
}

/// Builds the console report: requested sections in display order, each
/// under its banner. Empty sections are skipped. A requested Version
/// replaces the whole report with the version banner.
pub fn compose_console(results: &[ExtractionResult], registry: &OptionRegistry) -> String {
    let mut report = String::new();
    for &option in registry.output_order() {
        if !registry.is_requested(option) {
            continue;
        }
        let text = text_for(results, option);
        if option == OptionId::Version {
            report.push_str(text);
            return report;
        }
        if text.is_empty() {
            tracing::debug!("{} is empty, not printed", option.display_name());
            continue;
        }
        report.push_str(&format!(
            "{rule}[[{name} ]]]]{rule}\n{text}\n\n\n",
            rule = BANNER_RULE,
            name = option.display_name(),
            text = text,
        ));
    }
    report
}

pub fn render_to_console<W: Write>(
    results: &[ExtractionResult],
    registry: &OptionRegistry,
    out: &mut W,
) -> std::io::Result<()> {
    out.write_all(compose_console(results, registry).as_bytes())?;
    out.flush()
}

/// Writes one `<DisplayName>.txt` per result into `output_dir`, empty ones included.
/// Files written before a failure are left in place.
pub fn render_to_files(results: &[ExtractionResult], output_dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let storage = StorageManager::new(output_dir)?;
    results.iter().map(|result| storage.save_section(result)).collect()
}

/// File mode when `-O` was given, console mode otherwise.
pub fn output_results<W: Write>(
    results: &[ExtractionResult],
    registry: &OptionRegistry,
    console: &mut W,
) -> Result<(), AppError> {
    if registry.is_requested(OptionId::OutputFileName) {
        let output_dir = Path::new(registry.argument_value(OptionId::OutputFileName));
        let written = render_to_files(results, output_dir)?;
        tracing::info!("Wrote {} section file(s) to {}", written.len(), output_dir.display());
        Ok(())
    } else {
        render_to_console(results, registry, console).map_err(AppError::Console)
    }
}
