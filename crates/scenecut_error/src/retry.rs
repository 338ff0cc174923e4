//! Retry classification shared by the rate limiter and the providers.

use crate::{ModelsError, ScenecutError, ScenecutErrorKind};

/// Errors that know whether the failed operation is worth retrying.
pub trait RetryableError {
    /// Returns true for transient failures (timeouts, 429, 5xx).
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ModelsError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl RetryableError for ScenecutError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            ScenecutErrorKind::Models(e) => e.is_retryable(),
            ScenecutErrorKind::Http(_) => true,
            _ => false,
        }
    }
}
