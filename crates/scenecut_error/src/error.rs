//! Top-level error wrapper types.

use crate::{BackendError, ConfigError, HttpError, JsonError, ModelsError, SegmentError};

/// Every failure a scenecut crate can surface.
///
/// # Examples
///
/// ```
/// use scenecut_error::{HttpError, ScenecutError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: ScenecutError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScenecutErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Generation provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Chunking, extraction or reconciliation error
    #[from(SegmentError)]
    Segment(SegmentError),
}

/// Scenecut error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scenecut_error::{ConfigError, ScenecutResult};
///
/// fn might_fail() -> ScenecutResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Scenecut Error: {}", _0)]
pub struct ScenecutError(Box<ScenecutErrorKind>);

impl ScenecutError {
    /// Create a new error from a kind.
    pub fn new(kind: ScenecutErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScenecutErrorKind {
        &self.0
    }
}

impl<T> From<T> for ScenecutError
where
    T: Into<ScenecutErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for scenecut operations.
pub type ScenecutResult<T> = std::result::Result<T, ScenecutError>;
