// src/extractors/mod.rs
pub mod patterns;
pub mod section;

// Re-export key extraction types for convenience
pub use patterns::{PatternTable, PATTERNS_ENV};
pub use section::{ExtractionResult, SectionExtractor};
