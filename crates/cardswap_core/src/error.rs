//! # Carousel Error Types
//!
//! Everything that can go wrong before a carousel starts turning.
//! Once a carousel is running there are no error paths left.

use thiserror::Error;

/// Errors raised while preparing a carousel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardSwapError {
    /// The container holds no cards, so there is nothing to place or rotate.
    #[error("no cards to arrange")]
    NoCards,

    /// Option text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Option file could not be read.
    #[error("cannot read configuration {path}: {reason}")]
    ConfigIo {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
}

/// Result type for carousel preparation.
pub type CardSwapResult<T> = Result<T, CardSwapError>;
