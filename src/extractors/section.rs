// src/extractors/section.rs

// --- Imports ---
use crate::cli::options::{OptionId, OptionRegistry};
use crate::extractors::patterns::PatternTable;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Version Banner (Lazy Static) ---
static VERSION_BANNER: Lazy<String> = Lazy::new(|| {
    format!(
        "JDT : Jira Debugging Toolbox\n\
         Version : {}\n\
         Date : {}\n\
         Developer : Ahmed S. Lilah\n\
         Contacts : ahmed.lilah.ext@siemens.com\n",
        env!("CARGO_PKG_VERSION"),
        env!("JDT_BUILD_DATE"),
    )
});

// --- Data Structures ---
/// Text pulled out of the log for one requested option. May be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub option: OptionId,
    pub text: String,
}

/// A section pattern after compilation. `Ok(None)` is an unset pattern.
#[derive(Debug)]
struct CompiledPattern {
    section: OptionId,
    regex: Result<Option<Regex>, ExtractError>,
}

// --- Main Extractor Structure ---
#[derive(Debug)]
pub struct SectionExtractor {
    patterns: Vec<CompiledPattern>,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new(&PatternTable::builtin())
    }
}

impl SectionExtractor {
    /// Compiles every entry of the table. A pattern that fails to compile
    /// is kept as an error and only reported if its section is requested.
    pub fn new(table: &PatternTable) -> Self {
        let patterns = table
            .entries()
            .iter()
            .map(|entry| {
                let regex = if entry.is_unset() {
                    Ok(None)
                } else {
                    Regex::new(&entry.source)
                        .map(Some)
                        .map_err(|source| ExtractError::Pattern { section: entry.section, source })
                };
                CompiledPattern { section: entry.section, regex }
            })
            .collect();
        Self { patterns }
    }

    /// Pulls every requested section out of `log_text`.
    ///
    /// A requested Version short-circuits everything else. Each other requested
    /// section yields one result, in pattern-table order, even when nothing
    /// matched. A section whose pattern is broken is logged and left out.
    pub fn extract(&self, log_text: &str, registry: &OptionRegistry) -> Vec<ExtractionResult> {
        if registry.is_requested(OptionId::Version) {
            tracing::debug!("Version requested, skipping section extraction");
            return vec![ExtractionResult { option: OptionId::Version, text: VERSION_BANNER.clone() }];
        }

        let mut results = Vec::new();
        for pattern in self.patterns.iter().filter(|p| registry.is_requested(p.section)) {
            match &pattern.regex {
                Ok(regex) => {
                    let text = find_pattern(regex.as_ref(), log_text);
                    tracing::info!("Extracted {} ({} bytes)", pattern.section.display_name(), text.len());
                    results.push(ExtractionResult { option: pattern.section, text });
                }
                Err(e) => tracing::error!("{}", e),
            }
        }
        results
    }
}

/// Concatenates every non-overlapping match, in order, with nothing between them.
fn find_pattern(regex: Option<&Regex>, text: &str) -> String {
    match regex {
        Some(re) => re.find_iter(text).map(|m| m.as_str()).collect(),
        None => String::new(),
    }
}
