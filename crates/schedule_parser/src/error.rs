//! Error types for the schedule import service.
//!
//! The parser itself never fails; these cover configuration and the
//! request checks made before text reaches the parser.

use thiserror::Error;

/// Errors that can occur while serving schedule imports.
#[derive(Debug, Error, Clone)]
pub enum ScheduleImportError {
    /// Configuration file could not be parsed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Reading a file failed
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Request carried no schedule text
    #[error("No schedule text provided")]
    EmptyInput,

    /// Request text exceeds the configured limit
    #[error("Schedule text is {len} bytes, limit is {max} bytes")]
    InputTooLarge { len: usize, max: usize },
}

impl ScheduleImportError {
    /// Returns true if this error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScheduleImportError::EmptyInput | ScheduleImportError::InputTooLarge { .. }
        )
    }
}

impl From<std::io::Error> for ScheduleImportError {
    fn from(err: std::io::Error) -> Self {
        ScheduleImportError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ScheduleImportError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleImportError::Config {
            message: err.to_string(),
        }
    }
}
