// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::cli::options::OptionId;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Invalid argument \"{0}\".")]
    InvalidArgument(String),

    #[error("missing input file name\nUsage: jdt [options] input_file")]
    MissingInputFile,

    #[error("\"{}\" does not exist.", .0.display())]
    InputNotFound(PathBuf),

    #[error("{0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid pattern for section {section:?}: {source}")]
    Pattern {
        section: OptionId,
        #[source]
        source: regex::Error,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("couldn't read the input file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't create the output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't create the output file {}: {source}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't write the output file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("couldn't read pattern file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed pattern file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("pattern file names an unknown section \"{0}\"")]
    UnknownSection(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("couldn't write the report to the console: {0}")]
    Console(std::io::Error),
}
