//! Error types for the noteboard application.
//!
//! This module defines the error type shared by the store, the session,
//! the note repository and the command-line surface.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the noteboard application.
#[derive(Error, Debug)]
pub enum NoteboardError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Login attempted with anything other than the fixed credential pair.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A note operation was attempted without a logged-in session.
    #[error("Not logged in")]
    NotAuthenticated,

    /// A required form field was empty on submit.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// A canvas coordinate was infinite or NaN.
    #[error("Invalid position: ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },

    /// No id greater than the highest stored one is left.
    #[error("No note ids left after {last_id}")]
    IdsExhausted { last_id: i64 },

    /// Note was not found when looking it up for display or editing.
    #[error("Note not found: {id}")]
    NoteNotFound { id: i64 },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },
}
