/*!
 * Error types for the capalign application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 *
 * The cleaning and alignment pipeline itself is total: malformed blocks,
 * unresolvable groupings and degenerate timing all degrade to best-effort
 * results instead of surfacing here. These types cover the file and CLI
 * layer around the pipeline.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when loading grouping proposals
#[derive(Error, Debug)]
pub enum ProposalError {
    /// Error reading the proposals file
    #[error("Failed to read proposals: {0}")]
    Unreadable(String),

    /// Error when the proposals file is not valid JSON of the expected shape
    #[error("Failed to parse proposals: {0}")]
    ParseError(String),
}

/// Errors that can occur when handling caption files on disk
#[derive(Error, Debug)]
pub enum CaptionFileError {
    /// Input path missing entirely
    #[error("Caption file not found: {0}")]
    NotFound(String),

    /// Error reading or writing a caption file
    #[error("Caption file I/O failed: {0}")]
    Io(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from proposal loading
    #[error("Proposal error: {0}")]
    Proposal(#[from] ProposalError),

    /// Error from caption file handling
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionFileError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
