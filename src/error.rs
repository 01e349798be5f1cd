//! # Error Types
//!
//! This module defines error types used throughout the tirada crate.

use thiserror::Error;

/// Main error type for tirada operations
#[derive(Debug, Error)]
pub enum TiradaError {
    /// Card store query failure (the store machinery, not "no match" —
    /// an empty lookup result is `Ok(None)`, never an error)
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Failure acquiring or reading an input device
    #[error("Input device error: {0}")]
    Input(String),

    /// Failure writing to the seven-segment display
    #[error("Display error: {0}")]
    Display(String),

    /// Failure writing to the printer (transport or command level)
    #[error("Printer error: {0}")]
    Printer(String),

    /// Illustration decode failure
    #[error("Image error: {0}")]
    Image(String),

    /// `print-id` was asked for an id the store does not have
    #[error("No card with id {0}")]
    UnknownCard(i64),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
