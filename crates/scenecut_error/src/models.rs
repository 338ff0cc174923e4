//! Generation provider errors.

/// Failure conditions reported by a generation provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// API key environment variable is not set
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Request never produced an HTTP response
    #[display("HTTP transport failed: {}", _0)]
    Http(String),
    /// Provider answered with a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },
    /// Provider rejected the request for exceeding its quota
    #[display("Rate limit exceeded")]
    RateLimit,
    /// Requested model is unknown to the provider
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),
    /// Response body did not have the expected shape
    #[display("Failed to parse provider response: {}", _0)]
    ResponseParsing(String),
    /// Response carried no text content
    #[display("Provider returned an empty response")]
    EmptyResponse,
    /// Request could not be assembled
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

impl ModelsErrorKind {
    /// Whether a later attempt at the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelsErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            ModelsErrorKind::RateLimit | ModelsErrorKind::Http(_) => true,
            _ => false,
        }
    }
}

/// Provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for provider operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
