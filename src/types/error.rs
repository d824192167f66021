//! Error types for the UFVK viewer
//!
//! This module defines every error the client can surface. Errors are designed to be
//! descriptive and user-friendly, since most of them end up on screen as-is.
//!
//! # Error Categories
//!
//! - **Validation Errors**: missing or malformed form input, caught before any request
//! - **Submission / Polling Errors**: transport failures, malformed responses, timeouts,
//!   and logical errors reported by the backend
//! - **Export Errors**: nothing to export, CSV/JSON serialization, file I/O

use thiserror::Error;

/// Fixed message shown for every backend error that points at a bad viewing key
pub const INVALID_UFVK_MESSAGE: &str = "Couldn’t read this UFVK. Please check that you pasted a full, valid unified viewing key and try again.";

/// Message shown when the backend gave no error text at all
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Main error type for the viewer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// A required form field is empty
    ///
    /// Raised before any network call; no job is created.
    #[error("Please provide both a viewing key and a birthday height.")]
    MissingInput,

    /// The birthday height is not a whole number
    #[error("Birthday height must be a whole block number, got '{value}'")]
    InvalidBirthday {
        /// The rejected input
        value: String,
    },

    /// The request never produced a usable HTTP response
    #[error("Request failed: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// The response body could not be decoded
    #[error("Malformed response: {message}")]
    Decode {
        /// Description of the decoding failure
        message: String,
    },

    /// A single request exceeded the configured timeout
    #[error("Request timed out after {millis} ms")]
    Timeout {
        /// The timeout that elapsed
        millis: u64,
    },

    /// The backend reported a logical error
    ///
    /// The message has already been passed through [`prettify_error_message`].
    #[error("{message}")]
    Server {
        /// Display-ready message
        message: String,
    },

    /// An export was requested but its source is empty
    #[error("{notice}")]
    NothingToExport {
        /// User-facing notice explaining why nothing was produced
        notice: String,
    },

    /// CSV serialization failed
    #[error("CSV error: {message}")]
    CsvError {
        /// Description of the CSV error
        message: String,
    },

    /// JSON serialization failed
    #[error("JSON error: {message}")]
    JsonError {
        /// Description of the JSON error
        message: String,
    },

    /// I/O error while writing an export
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for ViewerError {
    fn from(error: std::io::Error) -> Self {
        ViewerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ViewerError {
    fn from(error: csv::Error) -> Self {
        ViewerError::CsvError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(error: serde_json::Error) -> Self {
        ViewerError::JsonError {
            message: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for ViewerError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ViewerError::Decode {
                message: error.to_string(),
            }
        } else {
            ViewerError::Transport {
                message: error.to_string(),
            }
        }
    }
}

impl ViewerError {
    /// Create an InvalidBirthday error
    pub fn invalid_birthday(value: &str) -> Self {
        ViewerError::InvalidBirthday {
            value: value.to_string(),
        }
    }

    /// Create a Server error from a raw backend message
    ///
    /// The message is prettified on the way in.
    pub fn server(raw: &str) -> Self {
        ViewerError::Server {
            message: prettify_error_message(raw),
        }
    }

    /// Create a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        ViewerError::Decode {
            message: message.into(),
        }
    }

    /// Create a NothingToExport error
    pub fn nothing_to_export(notice: &str) -> Self {
        ViewerError::NothingToExport {
            notice: notice.to_string(),
        }
    }

    /// Whether the error was raised locally before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ViewerError::MissingInput | ViewerError::InvalidBirthday { .. }
        )
    }
}

/// Map backend error strings into user-facing text
///
/// Anything that points at an unreadable viewing key collapses into
/// [`INVALID_UFVK_MESSAGE`]; every other message passes through verbatim.
pub fn prettify_error_message(raw: &str) -> String {
    if raw.is_empty() {
        return GENERIC_ERROR_MESSAGE.to_string();
    }

    let lower = raw.to_lowercase();
    let names_bad_key = lower.contains("backend tool failed")
        || lower.contains("read_view_key.py")
        || (lower.contains("invalid") && (lower.contains("view") || lower.contains("key")))
        || lower.contains("viewing key");

    if names_bad_key {
        INVALID_UFVK_MESSAGE.to_string()
    } else {
        raw.to_string()
    }
}
