// src/cli/mod.rs
pub mod options;
pub mod parser;

pub use options::{OptionId, OptionRegistry};
pub use parser::parse;
