//! Error types for the velocity limits engine
//!
//! This module defines all error types that can occur while reading load
//! attempts and writing decisions. The rule engine itself never fails: every
//! well-formed load attempt yields a decision. Errors only come from the
//! surrounding I/O.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Parse Errors**: Malformed JSON, missing fields
//! - **Record Errors**: Unparsable amounts or timestamps

use thiserror::Error;

/// Main error type for the velocity limits engine
///
/// Each variant includes relevant context to help locate the offending input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VelocityError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input or writing decisions
    ///
    /// This is a fatal error.
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A line could not be decoded as a load record
    ///
    /// Malformed JSON, wrong field types or a missing required field.
    /// Recoverable unless running in strict mode.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The load amount is not a non-negative money value
    #[error("Invalid load amount '{amount}' for load {id}")]
    InvalidAmount {
        /// The raw amount string
        amount: String,
        /// Load ID
        id: String,
    },

    /// The timestamp is not an ISO-8601 date-time with offset
    #[error("Invalid timestamp '{time}' for load {id}")]
    InvalidTimestamp {
        /// The raw timestamp string
        time: String,
        /// Load ID
        id: String,
    },
}

// Conversion from io::Error to VelocityError
impl From<std::io::Error> for VelocityError {
    fn from(error: std::io::Error) -> Self {
        VelocityError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to VelocityError
impl From<serde_json::Error> for VelocityError {
    fn from(error: serde_json::Error) -> Self {
        // serde_json reports the column within the line, not a file line
        VelocityError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl VelocityError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        VelocityError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Map a failure to open an input file
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(&path.display().to_string()),
            _ => VelocityError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            },
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, id: &str) -> Self {
        VelocityError::InvalidAmount {
            amount: amount.to_string(),
            id: id.to_string(),
        }
    }

    /// Create an InvalidTimestamp error
    pub fn invalid_timestamp(time: &str, id: &str) -> Self {
        VelocityError::InvalidTimestamp {
            time: time.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether processing can skip the offending record and continue
    ///
    /// Record-level problems are recoverable; file and I/O failures are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            VelocityError::ParseError { .. }
                | VelocityError::InvalidAmount { .. }
                | VelocityError::InvalidTimestamp { .. }
        )
    }

    /// Attach an input line number to the error
    ///
    /// Parse errors get the line in their own field; other record errors are
    /// wrapped into a ParseError so the line is always reported.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            VelocityError::ParseError { message, .. } => VelocityError::ParseError {
                line: Some(line),
                message,
            },
            err @ (VelocityError::InvalidAmount { .. } | VelocityError::InvalidTimestamp { .. }) => {
                VelocityError::ParseError {
                    line: Some(line),
                    message: err.to_string(),
                }
            }
            other => other,
        }
    }
}
