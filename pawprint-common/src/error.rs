//! Common error types for PawPrint

use thiserror::Error;

/// Common result type for PawPrint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across PawPrint crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    ///
    /// Always fatal at startup: a named configuration that cannot be loaded
    /// is never replaced by defaults.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
