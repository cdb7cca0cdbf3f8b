//! Error types for the pairtok libraries.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer libraries.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Training corpus is not valid UTF-8 text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Extraction from an empty priority queue
    #[error("Priority queue is empty")]
    EmptyQueue,

    /// Error loading the vocabulary store
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving the vocabulary store
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two tokens claim the same id
    #[error("Token ID {id} already assigned to {existing:?}")]
    DuplicateTokenId { id: u32, existing: String },

    /// Unknown token ID
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
