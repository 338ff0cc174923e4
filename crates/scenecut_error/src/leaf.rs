//! Message-only error types.
//!
//! Each type carries a free-form message plus the source location of the
//! constructor call, so every leaf error prints where it was raised.

macro_rules! leaf_error {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
        #[display("{}: {} at line {} in {}", $label, message, line, file)]
        pub struct $name {
            /// The underlying error message
            pub message: String,
            /// Line number where the error occurred
            pub line: u32,
            /// File where the error occurred
            pub file: &'static str,
        }

        impl $name {
            /// Create the error with the given message at the caller's location.
            #[track_caller]
            pub fn new(message: impl Into<String>) -> Self {
                let location = std::panic::Location::caller();
                Self {
                    message: message.into(),
                    line: location.line(),
                    file: location.file(),
                }
            }
        }
    };
}

leaf_error!(
    /// Transport failure talking to a generation endpoint.
    ///
    /// ```
    /// use scenecut_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.to_string().starts_with("HTTP Error: Connection refused"));
    /// ```
    HttpError,
    "HTTP Error"
);

leaf_error!(
    /// JSON serialization or deserialization failure.
    JsonError,
    "JSON Error"
);

leaf_error!(
    /// Invalid or unreadable configuration.
    ///
    /// ```
    /// use scenecut_error::ConfigError;
    ///
    /// let err = ConfigError::new("target_chunk_words must be positive");
    /// assert!(err.message.contains("target_chunk_words"));
    /// ```
    ConfigError,
    "Configuration Error"
);

leaf_error!(
    /// Generic failure inside a generation backend.
    BackendError,
    "Backend Error"
);
