//! Error types for grid operations.
//!
//! Interactive operations (toggle, locate, pan, zoom, gestures) never fail;
//! they report rejected or no-op outcomes instead. [`GridError`] is only
//! returned at the crate edges: configuration, checked edge construction and
//! JSON (de)serialization.

use thiserror::Error;

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur at the edges of the grid core.
#[derive(Debug, Error)]
pub enum GridError {
    /// Two points do not form a grid edge.
    #[error("Points are not adjacent: ({0}) and ({1})")]
    NotAdjacent(String, String),

    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// State document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
