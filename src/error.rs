//! Error types for terminal control

use std::io;
use thiserror::Error;

/// Editor core error type
///
/// All variants are unrecoverable: each one means the terminal session is
/// no longer usable for interaction. The binary reacts by resetting the
/// screen, reporting the cause, and exiting non-zero.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (read/write failure other than the idle timeout)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal attribute get/set failed
    #[error("Failed to configure terminal: {0}")]
    TerminalConfig(String),

    /// Terminal dimension query failed or reported a zero dimension
    #[error("Failed to query terminal size: {0}")]
    TerminalQuery(String),
}

/// Result type for editor core operations
pub type Result<T> = std::result::Result<T, Error>;
