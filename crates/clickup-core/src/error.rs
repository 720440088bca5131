//! Error types for clickup-core.

use thiserror::Error;

/// Result type alias for clickup-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in clickup-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),
}
