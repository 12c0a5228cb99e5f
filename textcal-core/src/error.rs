//! Error types for textcal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in textcal operations.
#[derive(Error, Debug)]
pub enum CalError {
    #[error("Could not parse date/time: \"{input}\"")]
    Parse { input: String },

    #[error("Missing ',' between date and event in \"{0}\"")]
    MissingSeparator(String),

    #[error("Invalid event description: {0}")]
    InvalidDescription(String),

    #[error("Malformed calendar line {line_number}: \"{line}\" (expected '<date> <time>, <event>')")]
    MalformedLine { line_number: usize, line: String },

    #[error("Calendar file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Could not read calendar file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write calendar file {}: {source}", .path.display())]
    Unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not lock calendar file {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalError {
    pub(crate) fn parse(input: &str) -> Self {
        CalError::Parse {
            input: input.trim().to_string(),
        }
    }
}

/// Result type alias for textcal operations.
pub type CalResult<T> = Result<T, CalError>;
