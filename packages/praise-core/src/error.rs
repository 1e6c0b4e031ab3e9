//! # Error Types
//!
//! This module defines the error types surfaced by the praise library.
//!
//! Chord and key problems never reach this module: an unknown chord token is passed
//! through untouched and an unknown key yields a zero offset. What remains are the
//! failures a user has to see:
//!
//! ## Error Types
//! - `Validation` - Required input missing, checked before any store call
//! - `Store` - A store call failed; carries the action that was being attempted
//! - `NotFound` - A referenced record does not exist
//! - `Metadata` - Invalid YAML frontmatter in a song file
//! - `Config` - Invalid configuration file
//! - `Io` / `Export` - Reading or writing files
//!
//! ## Usage
//! ```rust
//! use praise::{validate_required, PraiseError};
//!
//! match validate_required("date", "") {
//!     Ok(()) => println!("ok"),
//!     Err(PraiseError::Validation(message)) => eprintln!("{}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Failure reported by a [`Store`](crate::store::Store) implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{table} row '{id}' not found")]
    Missing { table: &'static str, id: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("could not persist store: {0}")]
    Persist(String),
}

#[derive(Error, Debug)]
pub enum PraiseError {
    /// Required input was empty.
    ///
    /// # Example
    /// ```
    /// # use praise::PraiseError;
    /// let err = PraiseError::Validation("Please enter your name and select a date.".to_string());
    /// assert_eq!(err.to_string(), "Please enter your name and select a date.");
    /// ```
    #[error("{0}")]
    Validation(String),

    /// A store call failed. The operation was abandoned.
    ///
    /// # Example
    /// ```
    /// # use praise::{PraiseError, StoreError};
    /// let err = PraiseError::Store {
    ///     action: "create setlist",
    ///     source: StoreError::Unavailable("timeout".to_string()),
    /// };
    /// assert_eq!(err.to_string(), "Failed to create setlist: store unavailable: timeout");
    /// ```
    #[error("Failed to {action}: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Invalid YAML frontmatter in a song file.
    #[error("Invalid song metadata: {0}")]
    Metadata(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Export failed: {0}")]
    Export(String),
}

impl PraiseError {
    /// Wrap a store failure with the user-facing action name.
    pub fn store(action: &'static str, source: StoreError) -> Self {
        PraiseError::Store { action, source }
    }
}

/// Reject an empty (or whitespace-only) required field.
pub fn validate_required(field: &str, value: &str) -> Result<(), PraiseError> {
    if value.trim().is_empty() {
        return Err(PraiseError::Validation(format!("Please enter a {}.", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Sunday").is_ok());
        let err = validate_required("name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a name.");
    }

    #[test]
    fn test_store_error_message() {
        let err = PraiseError::store(
            "update setlist",
            StoreError::Missing { table: "setlists", id: "abc".to_string() },
        );
        assert_eq!(err.to_string(), "Failed to update setlist: setlists row 'abc' not found");
    }
}
