//! Error types for the asq-search crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when working with the search backend.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Failed to open the index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to open a searcher session.
    #[error("failed to open searcher session: {0}")]
    Session(String),

    /// A search handler could not be constructed for a field. This is a
    /// startup-time configuration fault, not a per-request condition.
    #[error("failed to construct search handler for field '{field}': {message}")]
    Handler {
        /// The field whose handler failed to initialize.
        field: String,
        /// Error message.
        message: String,
    },

    /// Failed to execute a query.
    #[error("failed to execute query: {0}")]
    Execute(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SearchError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Session` error from a Tantivy error.
    pub(crate) fn session(source: &tantivy::TantivyError) -> Self {
        Self::Session(source.to_string())
    }

    /// Creates an `Execute` error from a Tantivy error.
    pub(crate) fn execute(source: &tantivy::TantivyError) -> Self {
        Self::Execute(source.to_string())
    }
}
