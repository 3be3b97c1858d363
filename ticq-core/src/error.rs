//! Error types for the client core.

use thiserror::Error;

/// Top-level error for ticq (transport, image resolution).
#[derive(Error, Debug)]
pub enum TicqError {
    /// The platform rejected or failed a send call (network, rate limit, bad chat id).
    #[error("Transport error: {0}")]
    Transport(String),

    /// An image segment could not be turned into something the platform accepts.
    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for core operations; uses [`TicqError`].
pub type Result<T> = std::result::Result<T, TicqError>;
