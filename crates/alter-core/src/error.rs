//! Errors raised when a value that must be present is missing.

use thiserror::Error;

/// A required value was absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MissingValueError {
    message: String,
}

impl MissingValueError {
    /// Builds the error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Shorthand for results carrying a [`MissingValueError`].
pub type Result<T> = std::result::Result<T, MissingValueError>;

/// Unwraps `value` or fails with the canonical missing-value message.
///
/// # Errors
/// Returns a [`MissingValueError`] when `value` is `None`.
pub fn require<T>(value: Option<T>) -> Result<T> {
    require_with(value, || "expected value to be present".to_string())
}

/// Unwraps `value` or fails with the supplied message.
///
/// The supplier runs only on failure, so a message that is expensive to
/// build costs nothing when the value is present.
///
/// # Errors
/// Returns a [`MissingValueError`] when `value` is `None`.
pub fn require_with<T, F>(value: Option<T>, message: F) -> Result<T>
where
    F: FnOnce() -> String,
{
    value.ok_or_else(|| MissingValueError::new(message()))
}
