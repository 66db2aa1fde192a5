//! Error types for the Limitless library.

use std::time::Duration;
use thiserror::Error;

/// Main error type for Limitless operations.
#[derive(Error, Debug)]
pub enum LimitlessError {
    /// Configuration-related errors, raised at construction time only
    #[error("Configuration error: {0}")]
    Config(String),

    /// A storage backend could not serve a request. The in-memory backend
    /// never produces this; external backends propagate it out of `admit`.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A bounded wait for admission ran out before a window slot freed up
    #[error("Admission deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Limitless operations.
pub type Result<T> = std::result::Result<T, LimitlessError>;
