// src/extractors/patterns.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::cli::options::OptionId;
use crate::utils::error::ConfigError;

/// Environment variable naming a JSON file of pattern overrides.
pub const PATTERNS_ENV: &str = "JDT_PATTERNS";

// --- Built-in Section Patterns ---
// A line body is `[^\r\n]*`: a line never spans a newline, and a bare `\r`
// is not part of it either, so CRLF logs don't match.
// An empty pattern means the section has no pattern yet and always comes out empty.
const BUILTIN_PATTERNS: [(OptionId, &str); 8] = [
    // SIM_ERROR line plus its tab-indented continuation lines
    (OptionId::Errors, r"(SIM_ERROR[^\r\n]*\n(( \t|\t)+[^\r\n]*\n)*)|(SIM_ERROR[^\r\n]*\n)"),
    (OptionId::Warnings, r"(SIM_WARNING[^\r\n]*\n(( \t|\t)+[^\r\n]*\n)*)|(SIM_WARNING[^\r\n]*\n)"),
    // "*** Options Used" / "*** Options Ignored" listing, up to the blank line
    (OptionId::Options, r"\*+ Options (Used|Ignored)[^\r\n]*\n( [^\r\n]*\n)*\n"),
    (OptionId::Commandline, r"[^\r\n]*Command-Line Options Used[^\r\n]*\n[^\r\n]*\n"),
    (OptionId::Analyses, ""),
    // Fourteen lines framed by two rows of asterisks
    (OptionId::InfoCard, r" \*{60,}DEVELOPER\n([^\r\n]*\n){14} \*{60,}\n"),
    (OptionId::Timings, ""),
    // Runs to the end of the log
    (OptionId::Summary, r"[^\r\n]*SIMULATION finished with[^\r\n]*\n([^\r\n]*\n)*"),
];

/// One section's pattern source, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub section: OptionId,
    pub source: String,
}

impl PatternEntry {
    pub fn is_unset(&self) -> bool {
        self.source.is_empty()
    }
}

/// Ordered section -> pattern table. The order is the extraction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct PatternOverrides(BTreeMap<String, String>);

impl PatternTable {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_PATTERNS
                .iter()
                .map(|(section, source)| PatternEntry { section: *section, source: source.to_string() })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// Replaces patterns by section display name. Names must refer to a
    /// section already in the table; the sources are not compiled here.
    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Result<Self, ConfigError> {
        for (name, source) in overrides {
            let entry = OptionId::from_display_name(&name)
                .and_then(|id| self.entries.iter_mut().find(|e| e.section == id))
                .ok_or_else(|| ConfigError::UnknownSection(name.clone()))?;
            tracing::info!("Overriding pattern for {}: {:?}", name, source);
            entry.source = source;
        }
        Ok(self)
    }

    /// Built-in table, with overrides from `path` applied if given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::builtin().with_overrides(load_overrides(path)?),
            None => Ok(Self::builtin()),
        }
    }
}

/// Reads a `{ "<Section>": "<regex>", ... }` JSON file.
pub fn load_overrides(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let overrides: PatternOverrides = serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded {} pattern override(s) from {}", overrides.0.len(), path.display());
    Ok(overrides.0)
}
