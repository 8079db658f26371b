//! Error handling for the roast-loss CLI
//!
//! The calculation core never errors on user input; these variants cover
//! the surfaces that can actually fail: the store, the filesystem, and
//! settings the user must fix.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Row {0} not found")]
    RowNotFound(u32),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

/// Result type alias for CLI operations
pub type AppResult<T> = Result<T, AppError>;
