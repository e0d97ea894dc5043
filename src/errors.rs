//! Error types for the webnotes application.
//!
//! Validation and not-found errors are reported to the caller. Persistence
//! errors are produced by adapters but the note store absorbs them once the
//! in-memory change has been made.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the webnotes application.
#[derive(Error, Debug)]
pub enum NotesError {
    /// A title or content field was empty after trimming.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// Category label outside the fixed set.
    #[error("Unknown category: {value}")]
    InvalidCategory { value: String },

    /// Read or write failure at the persistence adapter boundary.
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },
}

impl NotesError {
    /// Whether the caller can fix the request and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NotesError::Validation { .. }
                | NotesError::NoteNotFound { .. }
                | NotesError::InvalidCategory { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_errors_are_caller_errors() {
        assert!(NotesError::Validation {
            message: "title must not be empty".to_string()
        }
        .is_recoverable());
        assert!(NotesError::NoteNotFound {
            id: "42".to_string()
        }
        .is_recoverable());
        assert!(!NotesError::Persistence {
            message: "disk full".to_string()
        }
        .is_recoverable());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = NotesError::NoteNotFound {
            id: "1700000000000".to_string(),
        };
        assert_eq!(err.to_string(), "Note not found: 1700000000000");
    }
}
