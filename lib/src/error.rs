//! Error types for transform construction and application

use thiserror::Error;

/// Errors raised by transform construction and transform calls.
///
/// Near-zero window weights are never reported here: they are floored to
/// [`crate::window::WINDOW_EPSILON`] before any reciprocal is taken.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Bad frame size, hop length or window name at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Signal or spectrum shape mismatch at call time
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
