//! Error types for Lexis core operations.
//!
//! This module defines well-structured error types using `thiserror` for
//! library-level errors, while the binaries use `anyhow` at the top level.

use crate::types::Field;
use thiserror::Error;

/// Result type alias using LexisError
pub type Result<T> = std::result::Result<T, LexisError>;

/// Core error types for Lexis operations.
///
/// Every operation reports failure through one of these variants. None of
/// them is fatal: the presentation layer turns each into a message and the
/// store is left as it was before the failed call.
#[derive(Error, Debug)]
pub enum LexisError {
    // === Input Errors ===
    /// A required input is missing, blank, or not one of the allowed values
    #[error("{field}: {reason}")]
    Validation { field: Field, reason: String },

    /// An entry with the same word, part of speech, and definition already exists
    #[error("an entry for '{word}' ({part_of_speech}) with this definition already exists: {definition}")]
    Duplicate {
        word: String,
        part_of_speech: String,
        definition: String,
    },

    // === Lookup Errors ===
    /// No entry matches the given word, part of speech, and definition
    #[error("no entry for '{word}' ({part_of_speech}) with definition: {definition}")]
    NoMatchingEntry {
        word: String,
        part_of_speech: String,
        definition: String,
    },

    /// The word has fewer entries than the requested 1-based index
    #[error("'{word}' has {matches} entries, there is no entry {index}")]
    NoSuchIndex {
        word: String,
        index: usize,
        matches: usize,
    },

    /// The word does not appear in the store at all
    #[error("'{word}' is not in the dictionary")]
    UnknownWord { word: String },

    // === Storage Errors ===
    /// A row in the store does not have the expected number of fields
    #[error("malformed row at line {line}: found {found} fields, expected {expected}")]
    MalformedRow {
        line: u64,
        found: usize,
        expected: usize,
    },

    /// The store could not be parsed or encoded
    #[error("store format error: {0}")]
    Csv(String),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Configuration Errors ===
    /// Configuration file parsing failed or holds unusable values
    #[error("configuration error: {reason}")]
    Config { reason: String },

    // === Speech Errors ===
    /// The speech backend could not speak
    #[error("speech error: {reason}")]
    Speech { reason: String },
}

impl LexisError {
    /// Returns true if the user can fix this by changing the input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LexisError::Validation { .. }
                | LexisError::Duplicate { .. }
                | LexisError::NoMatchingEntry { .. }
                | LexisError::NoSuchIndex { .. }
                | LexisError::UnknownWord { .. }
        )
    }

    /// Returns true if the targeted entry or word does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LexisError::NoMatchingEntry { .. }
                | LexisError::NoSuchIndex { .. }
                | LexisError::UnknownWord { .. }
        )
    }

    /// Short heading shown above the message.
    pub fn title(&self) -> &'static str {
        match self {
            LexisError::Validation { .. } => "Missing Information",
            LexisError::Duplicate { .. } => "Duplicate Entry",
            LexisError::NoMatchingEntry { .. } => "No Matching Record",
            LexisError::NoSuchIndex { .. } | LexisError::UnknownWord { .. } => "Word Not Found",
            LexisError::MalformedRow { .. } | LexisError::Csv(_) | LexisError::Io(_) => {
                "Storage Error"
            }
            LexisError::Config { .. } => "Configuration Error",
            LexisError::Speech { .. } => "Speech Error",
        }
    }

    /// Create a validation error for a field
    pub fn validation(field: Field, reason: impl Into<String>) -> Self {
        LexisError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        LexisError::Config {
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for LexisError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => LexisError::Io(io),
            _ => LexisError::Csv(message),
        }
    }
}
